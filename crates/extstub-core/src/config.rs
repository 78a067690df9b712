//! Stub output configuration (`extstub.toml`) parsing and validation.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Conventional name of the configuration file.
pub const CONFIG_FILE: &str = "extstub.toml";

/// Default notice written into the file header.
pub const DEFAULT_HEADER: &str = "Generated stub file for code completion purposes";

/// Default literal emitted for defaults that cannot be resolved.
pub const DEFAULT_UNKNOWN_LITERAL: &str = "'<?>'";

/// Largest accepted indentation width.
const MAX_INDENT: usize = 16;

/// Errors that can occur when working with configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{0}': {1}")]
    Invalid(&'static str, String),
}

/// Line ending used in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    /// Returns the line terminator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// The complete extstub.toml file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    output: StubConfig,
}

/// Stub rendering configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct StubConfig {
    /// Number of spaces used to indent class members
    pub indent: usize,
    /// Notice placed in the file header comment
    pub header: String,
    /// Literal emitted for optional parameters whose default is unknown
    pub unknown_default: String,
    /// Line ending for the generated document
    pub line_ending: LineEnding,
    /// Whether to end the document with a newline
    pub trailing_newline: bool,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            header: DEFAULT_HEADER.to_string(),
            unknown_default: DEFAULT_UNKNOWN_LITERAL.to_string(),
            line_ending: LineEnding::default(),
            trailing_newline: true,
        }
    }
}

impl StubConfig {
    /// Load a configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.output.validate()?;
        Ok(file.output)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.indent == 0 || self.indent > MAX_INDENT {
            return Err(ConfigError::Invalid(
                "indent",
                format!("expected 1 to {MAX_INDENT} spaces, got {}", self.indent),
            ));
        }

        if self.unknown_default.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "unknown-default",
                "placeholder literal cannot be empty".to_string(),
            ));
        }

        if self.header.contains("*/") {
            return Err(ConfigError::Invalid(
                "header",
                "header cannot contain '*/'".to_string(),
            ));
        }

        Ok(())
    }

    /// Indentation string for one nesting level
    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = StubConfig::parse("").unwrap();
        assert_eq!(config, StubConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[output]
indent = 2
header = "IDE helper"
unknown-default = "null"
line-ending = "crlf"
trailing-newline = false
"#;
        let config = StubConfig::parse(toml).unwrap();
        assert_eq!(config.indent, 2);
        assert_eq!(config.indent_str(), "  ");
        assert_eq!(config.header, "IDE helper");
        assert_eq!(config.unknown_default, "null");
        assert_eq!(config.line_ending, LineEnding::Crlf);
        assert!(!config.trailing_newline);
    }

    #[test]
    fn line_ending_terminators() {
        assert_eq!([LineEnding::Lf, LineEnding::Crlf].map(LineEnding::as_str), ["\n", "\r\n"]);
    }

    #[test]
    fn invalid_indent() {
        let err = StubConfig::parse("[output]\nindent = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("indent", _)));

        let err = StubConfig::parse("[output]\nindent = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("indent", _)));
    }

    #[test]
    fn invalid_placeholder() {
        let err = StubConfig::parse("[output]\nunknown-default = \" \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("unknown-default", _)));
    }

    #[test]
    fn header_cannot_close_comment() {
        let err = StubConfig::parse("[output]\nheader = \"oops */\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("header", _)));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = StubConfig::parse("[output]\ntabs = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[output]\nindent = 8\n").unwrap();

        let config = StubConfig::from_path(&path).unwrap();
        assert_eq!(config.indent, 8);
        assert!(matches!(
            StubConfig::from_path(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
