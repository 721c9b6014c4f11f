//! Declarative logger configuration
//!
//! [`LoggerConfig`] describes a logger in plain data so it can be loaded
//! from JSON (or any serde format) and turned into a [`Logger`].
//!
//! ```
//! use rust_logx::core::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "level": "warn",
//!     "format": "json",
//!     "json_field_args": true,
//!     "output": "discard",
//!     "prefix": ["service", "billing"]
//! }"#).unwrap();
//!
//! let logger = config.build().unwrap();
//! assert_eq!(logger.prefix_args().len(), 2);
//! ```

use super::error::{LoggerError, Result};
use super::log_level::Level;
use super::logger::Logger;
use super::value::Value;
use crate::formatters::{JsonFormatter, TextFieldFormatter, TextFormatter};
use serde::{Deserialize, Serialize};
use std::io;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Use the process-wide default formatter
    #[default]
    Default,
    Text,
    TextField,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Use the process-wide default sink
    #[default]
    Default,
    Stdout,
    Stderr,
    Discard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level name (`debug`, `info`, `warn`, `error`) or number
    pub level: Option<String>,
    pub add_source: bool,
    pub format: FormatKind,
    /// Color the level in text output
    pub color: bool,
    /// Render JSON args as a key/value object instead of an array
    pub json_field_args: bool,
    pub output: OutputKind,
    pub prefix: Vec<String>,
    pub suffix: Vec<String>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override `level` from an environment variable when it is set
    #[must_use]
    pub fn level_from_env(mut self, var: &str) -> Self {
        if let Ok(level) = std::env::var(var) {
            self.level = Some(level);
        }
        self
    }

    pub fn parsed_level(&self) -> Result<Level> {
        match &self.level {
            Some(level) => level.parse(),
            None => Ok(Level::DEBUG),
        }
    }

    pub fn build(&self) -> Result<Logger> {
        let mut logger = Logger::new();
        logger.set_level(self.parsed_level()?);
        logger.set_add_source(self.add_source);

        if self.color && !matches!(self.format, FormatKind::Text) {
            return Err(LoggerError::config(
                "color",
                "colors are only supported by the text format",
            ));
        }
        if self.json_field_args && !matches!(self.format, FormatKind::Json) {
            return Err(LoggerError::config(
                "json_field_args",
                "field args are only supported by the json format",
            ));
        }

        match self.format {
            FormatKind::Default => {}
            FormatKind::Text => logger.set_formatter(TextFormatter::new().with_color(self.color)),
            FormatKind::TextField => logger.set_formatter(TextFieldFormatter::new()),
            FormatKind::Json if self.json_field_args => {
                logger.set_formatter(JsonFormatter::new().with_field_args())
            }
            FormatKind::Json => logger.set_formatter(JsonFormatter::new()),
        }

        match self.output {
            OutputKind::Default => {}
            OutputKind::Stdout => logger.set_output(io::stdout()),
            OutputKind::Stderr => logger.set_output(io::stderr()),
            OutputKind::Discard => logger.set_output(io::sink()),
        }

        logger.set_prefix_args(self.prefix.iter().cloned().map(Value::from));
        logger.set_suffix_args(self.suffix.iter().cloned().map(Value::from));
        Ok(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        let logger = config.build().unwrap();
        assert_eq!(logger.level(), Level::DEBUG);
        assert!(!logger.add_source());
        assert!(logger.prefix_args().is_empty());
    }

    #[test]
    fn test_from_json() {
        let config = LoggerConfig::from_json(
            r#"{"level":"INFO","add_source":true,"format":"text_field","suffix":["v","1"]}"#,
        )
        .unwrap();
        assert_eq!(config.format, FormatKind::TextField);
        assert_eq!(config.output, OutputKind::Default);

        let logger = config.build().unwrap();
        assert_eq!(logger.level(), Level::INFO);
        assert!(logger.add_source());
        assert_eq!(logger.suffix_args(), &[Value::from("v"), Value::from("1")]);
    }

    #[test]
    fn test_invalid_level() {
        let config = LoggerConfig {
            level: Some("verbose".to_string()),
            ..LoggerConfig::default()
        };
        assert!(matches!(config.build(), Err(LoggerError::InvalidLevel(_))));
    }

    #[test]
    fn test_inconsistent_options() {
        let config = LoggerConfig {
            format: FormatKind::Json,
            color: true,
            ..LoggerConfig::default()
        };
        assert!(matches!(
            config.build(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let config = LoggerConfig {
            format: FormatKind::Text,
            json_field_args: true,
            ..LoggerConfig::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(matches!(
            LoggerConfig::from_json(r#"{"format":"xml"}"#),
            Err(LoggerError::Encode(_))
        ));
    }

    #[test]
    fn test_level_from_env() {
        std::env::set_var("RUST_LOGX_TEST_LEVEL", "error");
        let config = LoggerConfig::new().level_from_env("RUST_LOGX_TEST_LEVEL");
        assert_eq!(config.parsed_level().unwrap(), Level::ERROR);

        let config = LoggerConfig::new().level_from_env("RUST_LOGX_TEST_LEVEL_UNSET");
        assert_eq!(config.level, None);
    }
}
