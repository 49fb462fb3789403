//! Loading of user defaults and script files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::types::{RevealConfig, Script, ScriptSource};

impl RevealConfig {
    /// Load the user defaults from `~/.config/typedtext/config.json`.
    ///
    /// A missing file yields the built-in defaults. An unreadable or invalid
    /// file does too, with a warning.
    pub fn load_user() -> Self {
        Self::load_user_from(&Self::user_config_path())
    }

    /// `load_user` against an explicit path.
    pub fn load_user_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no user config, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("invalid user config ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RevealConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Prompt and cursor must be printable and stay on one line, or the
    /// window arithmetic would no longer match what is on screen.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.chars().any(char::is_control) {
            return Err(ConfigError::Invalid("prompt contains a control character".into()));
        }
        if self.cursor.chars().any(char::is_control) {
            return Err(ConfigError::Invalid("cursor contains a control character".into()));
        }
        Ok(())
    }

    fn user_config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("typedtext");
        path.push("config.json");
        path
    }
}

impl Script {
    /// Every line must render as exactly one row. Newlines would show more
    /// completed rows than the window allows, and escapes would reach the
    /// terminal as commands.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, line) in self.lines().iter().enumerate() {
            if let Some(ch) = line.chars().find(|c| c.is_control()) {
                return Err(ConfigError::Invalid(format!(
                    "line {} contains control character {:?}",
                    i + 1,
                    ch
                )));
            }
        }
        Ok(())
    }
}

/// Read a script file. Fields in the file's own `config` win over `defaults`;
/// fields it leaves out keep their value from `defaults`.
pub fn load_script(path: &Path, defaults: RevealConfig) -> Result<(Script, RevealConfig), ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source: ScriptSource = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    source.lines.validate()?;
    let config = match source.config {
        Some(overrides) => apply_overrides(defaults, overrides, path)?,
        None => defaults,
    };
    config.validate()?;
    debug!(lines = source.lines.len(), path = %path.display(), "loaded script");
    Ok((source.lines, config))
}

fn apply_overrides(
    defaults: RevealConfig,
    overrides: Map<String, Value>,
    path: &Path,
) -> Result<RevealConfig, ConfigError> {
    let parse_error = |source: serde_json::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut merged = serde_json::to_value(defaults).map_err(parse_error)?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(overrides);
    }
    serde_json::from_value(merged).map_err(parse_error)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::types::Markup;

    fn write_temp(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let file = write_temp(r#"{ "scroll_window": 3, "markup": "html" }"#);
        let config = RevealConfig::load_from(file.path()).unwrap();
        assert_eq!(config.scroll_window, 3);
        assert_eq!(config.markup, Markup::Html);
        assert_eq!(config.typing_delay_ms, 5);
        assert_eq!(config.line_delay_ms, 400);
        assert_eq!(config.prompt, "$ ");
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let file = write_temp("{ not json");
        let err = RevealConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn multiline_cursor_is_rejected() {
        let file = write_temp(r#"{ "cursor": "_\n" }"#);
        let err = RevealConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RevealConfig::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn script_without_config_uses_given_defaults() {
        let file = write_temp(r#"{ "lines": ["one", "two"] }"#);
        let defaults = RevealConfig {
            typing_delay_ms: 50,
            ..RevealConfig::default()
        };
        let (script, config) = load_script(file.path(), defaults.clone()).unwrap();
        assert_eq!(script, Script::new(["one", "two"]));
        assert_eq!(config, defaults);
    }

    #[test]
    fn script_config_is_merged_over_defaults() {
        let file = write_temp(r#"{ "lines": ["x"], "config": { "line_delay_ms": 10 } }"#);
        let defaults = RevealConfig {
            typing_delay_ms: 50,
            ..RevealConfig::default()
        };
        let (_, config) = load_script(file.path(), defaults).unwrap();
        assert_eq!(config.line_delay_ms, 10);
        assert_eq!(config.typing_delay_ms, 50);
    }

    #[test]
    fn script_config_with_wrong_type_is_a_parse_error() {
        let file = write_temp(r#"{ "lines": ["x"], "config": { "scroll_window": "wide" } }"#);
        let err = load_script(file.path(), RevealConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn script_line_with_newline_is_rejected() {
        let file = write_temp(r#"{ "lines": ["a\nb\nc", "d"] }"#);
        let err = load_script(file.path(), RevealConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("line 1")));
    }

    #[test]
    fn script_line_with_escape_is_rejected() {
        let script = Script::new(["ok", "clear\u{1b}[2J"]);
        let err = script.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("line 2")));
        assert!(Script::new(["日本", "plain text"]).validate().is_ok());
    }

    #[test]
    fn user_config_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RevealConfig::load_user_from(&dir.path().join("config.json"));
        assert_eq!(config, RevealConfig::default());
    }

    #[test]
    fn user_config_invalid_file_gives_defaults() {
        let file = write_temp(r#"{ "typing_delay_ms": "fast" }"#);
        assert_eq!(RevealConfig::load_user_from(file.path()), RevealConfig::default());

        let file = write_temp(r#"{ "prompt": "$\n" }"#);
        assert_eq!(RevealConfig::load_user_from(file.path()), RevealConfig::default());
    }

    #[test]
    fn user_config_survives_a_save_and_reload() {
        let config = RevealConfig {
            typing_delay_ms: 30,
            line_delay_ms: 900,
            scroll_window: 4,
            prompt: "> ".into(),
            cursor: "█".into(),
            markup: Markup::Html,
            target: "banner".into(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(RevealConfig::load_user_from(&path), config);
    }
}
