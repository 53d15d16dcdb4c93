//! Configuration loading and typed config structures for the planner.
//!
//! Configuration lives in an optional `oreganizer.yaml`. Every field has a
//! default, so a missing file, an empty file, or a file with only a few keys
//! set are all valid.
//!
//! `OREGANIZER_REPORT_FORMAT` overrides `report.format`. The log level is
//! overridden by `RUST_LOG`, which the binary hands to its env filter.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "oreganizer.yaml";

/// Environment variable that overrides `report.format`.
pub const REPORT_FORMAT_ENV: &str = "OREGANIZER_REPORT_FORMAT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An override carried a value that is not one of the accepted choices.
    #[error("invalid value {value:?} for {key}; expected one of: {expected}")]
    InvalidValue {
        /// Where the value came from.
        key: &'static str,
        /// The rejected value.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OreganizerConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl OreganizerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `OREGANIZER_REPORT_FORMAT` overrides `report.format` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidValue`] if the environment override is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    /// Environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file).
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `OREGANIZER_REPORT_FORMAT` if it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the variable holds an
    /// unknown format.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.override_report_format(std::env::var(REPORT_FORMAT_ENV).ok().as_deref())
    }

    /// Set `report.format` from a textual override, if one is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `value` is not a known
    /// format.
    pub fn override_report_format(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        if let Some(value) = value {
            self.report.format = value.parse()?;
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log line format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,

    /// Print the step-by-step resolver trace.
    #[serde(default)]
    pub show_trace: bool,

    /// Check the conservation identity after planning.
    #[serde(default = "default_true")]
    pub verify_conservation: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            show_trace: false,
            verify_conservation: default_true(),
        }
    }
}

/// How the finished plan is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Sectioned plain text.
    #[default]
    Text,
    /// The serialized plan.
    Json,
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "report.format",
                value: s.to_owned(),
                expected: "text, json",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = OreganizerConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.report.format, ReportFormat::Text);
        assert!(!config.report.show_trace);
        assert!(config.report.verify_conservation);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
logging:
  level: "debug"
  format: json

report:
  format: json
  show_trace: true
  verify_conservation: false
"#;

        let config = OreganizerConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(config.report.show_trace);
        assert!(!config.report.verify_conservation);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "report:\n  show_trace: true\n";
        let config = OreganizerConfig::parse(yaml).ok().unwrap_or_default();

        assert!(config.report.show_trace);
        // Everything else uses defaults
        assert!(config.report.verify_conservation);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = OreganizerConfig::parse("");
        assert_eq!(config.ok(), Some(OreganizerConfig::default()));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let config = OreganizerConfig::parse("report:\n  format: html\n");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn override_report_format() {
        let mut config = OreganizerConfig::default();
        assert!(config.override_report_format(Some("JSON")).is_ok());
        assert_eq!(config.report.format, ReportFormat::Json);

        assert!(config.override_report_format(None).is_ok());
        assert_eq!(config.report.format, ReportFormat::Json);

        let bad = config.override_report_format(Some("xml"));
        assert!(matches!(bad, Err(ConfigError::InvalidValue { key: "report.format", .. })));
    }

    #[test]
    fn absent_override_keeps_defaults() {
        let mut config = OreganizerConfig::default();
        assert!(config.override_report_format(None).is_ok());
        assert_eq!(config, OreganizerConfig::default());
    }
}
