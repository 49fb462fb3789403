//! Engine — the reveal state machine.
//!
//! A `Revealer` owns a `Script` and its `RevealConfig` and advances one tick
//! at a time, producing the buffer to display and the delay before the next
//! tick. It never touches a surface or a clock; driving it is the job of
//! [`crate::playback`].

pub mod buffer;

use std::time::Duration;

use tracing::debug;

use crate::types::{RevealConfig, Script, TimedFrame, Timeline};

/// Mutable playback position. Only `Revealer::tick` moves it forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub line_index: usize,
    pub char_pos: usize,
}

/// Where the revealer stands before its next tick.
///
/// An empty line has nothing to type, so it is in `LineAdvance` from its
/// first tick on. A script that opens with an empty line therefore starts in
/// `LineAdvance { line_index: 0 }` rather than `Typing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing { line_index: usize, char_pos: usize },
    /// The active line is fully revealed; the next tick shows it once more and moves on.
    LineAdvance { line_index: usize },
    Done,
}

/// What happens after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    After(Duration),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub text: String,
    pub next: Step,
}

pub struct Revealer {
    script: Script,
    config: RevealConfig,
    state: PlaybackState,
}

impl Revealer {
    pub fn new(script: Script, config: RevealConfig) -> Self {
        Self {
            script,
            config,
            state: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn is_done(&self) -> bool {
        self.state.line_index >= self.script.len()
    }

    pub fn phase(&self) -> Phase {
        if self.is_done() {
            return Phase::Done;
        }
        let PlaybackState { line_index, char_pos } = self.state;
        if char_pos == self.script.char_len(line_index) {
            Phase::LineAdvance { line_index }
        } else {
            Phase::Typing { line_index, char_pos }
        }
    }

    /// Render the current position and advance. Returns `None` once done.
    ///
    /// The end-of-line check happens before `char_pos` moves, so a finished
    /// line is shown with the cursor for one extra tick before the next line.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.is_done() {
            return None;
        }

        let PlaybackState { line_index, char_pos } = self.state;
        let text = buffer::compose(&self.script, line_index, char_pos, &self.config);

        let next = if char_pos == self.script.char_len(line_index) {
            self.state = PlaybackState {
                line_index: line_index + 1,
                char_pos: 0,
            };
            if self.is_done() {
                debug!(lines = self.script.len(), "script exhausted");
                Step::Done
            } else {
                Step::After(self.config.line_delay())
            }
        } else {
            self.state.char_pos += 1;
            Step::After(self.config.typing_delay())
        };

        Some(Tick { text, next })
    }
}

pub struct Engine;

impl Engine {
    /// Run a script to completion without waiting and collect every frame.
    pub fn compile(script: &Script, config: &RevealConfig) -> Timeline {
        let mut revealer = Revealer::new(script.clone(), config.clone());
        let mut frames = Vec::new();

        while let Some(tick) = revealer.tick() {
            let delay_ms = match tick.next {
                Step::After(d) => Some(d.as_millis() as u64),
                Step::Done => None,
            };
            frames.push(TimedFrame {
                text: tick.text,
                delay_ms,
            });
        }

        Timeline { frames }
    }
}
