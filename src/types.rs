//! Shared boundary types for typedtext.
//!
//! This module defines the data contracts between the pieces:
//! - Host → Engine: `Script` plus `RevealConfig` (usually read from a `ScriptSource` file)
//! - Engine → file: `Timeline` containing `TimedFrame`s

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// The ordered lines to type. Immutable once playback starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script(Vec<String>);

impl Script {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Script(lines.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn line(&self, index: usize) -> &str {
        &self.0[index]
    }

    /// Length of a line in characters, which is the unit the revealer counts in.
    pub fn char_len(&self, index: usize) -> usize {
        self.0[index].chars().count()
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How the newline marker and script text are written into the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Markup {
    #[default]
    Plain,
    Html,
}

fn default_typing_delay_ms() -> u64 { 5 }
fn default_line_delay_ms() -> u64 { 400 }
fn default_scroll_window() -> usize { 20 }
fn default_prompt() -> String { "$ ".into() }
fn default_cursor() -> String { "_".into() }
fn default_target() -> String { "typedtext".into() }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Pause between two character reveals.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    /// Pause after a line has been fully shown, before the next line starts.
    #[serde(default = "default_line_delay_ms")]
    pub line_delay_ms: u64,
    /// Maximum number of completed lines kept above the active one.
    #[serde(default = "default_scroll_window")]
    pub scroll_window: usize,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_cursor")]
    pub cursor: String,
    #[serde(default)]
    pub markup: Markup,
    /// Id of the surface the host should resolve.
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            typing_delay_ms: default_typing_delay_ms(),
            line_delay_ms: default_line_delay_ms(),
            scroll_window: default_scroll_window(),
            prompt: default_prompt(),
            cursor: default_cursor(),
            markup: Markup::default(),
            target: default_target(),
        }
    }
}

impl RevealConfig {
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn line_delay(&self) -> Duration {
        Duration::from_millis(self.line_delay_ms)
    }
}

/// A script file as authored by hand: the lines plus optional overrides.
///
/// `config` holds any subset of `RevealConfig` fields; each one present
/// replaces the matching user default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSource {
    pub lines: Script,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Default for ScriptSource {
    fn default() -> Self {
        ScriptSource {
            lines: Script::new([
                "hi, i'm rosesecurity",
                "and idempotence is my love language",
            ]),
            config: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine → file boundary (serialized by `compile`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedFrame {
    pub text: String,
    /// Delay scheduled after this frame. Absent on the final frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub frames: Vec<TimedFrame>,
}

impl Timeline {
    /// Total time from the first frame to the last.
    pub fn duration(&self) -> Duration {
        let ms = self.frames.iter().filter_map(|f| f.delay_ms).sum();
        Duration::from_millis(ms)
    }
}
