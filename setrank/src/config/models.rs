//! Configuration model definitions.
//!
//! This module contains the configuration structures for all setrank
//! components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::Result;

/// Main configuration structure for setrank.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SetrankConfig {
    /// Ranking presentation configuration
    pub ranking: RankingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl SetrankConfig {
    /// Validate the configuration, returning the first error found
    pub fn validate(&self) -> Result<()> {
        self.ranking.validate()
    }
}

/// Presentation-side ranking knobs.
///
/// These never change scoring semantics; they only shape what a caller shows
/// of a ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum number of entries to present (None = all)
    pub limit: Option<usize>,

    /// What to do with filter-excluded (sentinel-scored) entries
    pub excluded: ExcludedPolicy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: None,
            excluded: ExcludedPolicy::Hide,
        }
    }
}

impl RankingConfig {
    /// Validate the configuration, returning an error if invalid
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(super::ConfigError::ValidationError(
                "ranking.limit must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Presentation policy for entries excluded by the tag filter.
///
/// The engine keeps excluded entries in the ranking with the sentinel score;
/// this policy decides how a presenter disposes of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExcludedPolicy {
    /// Drop excluded entries from the rendered output
    Hide,

    /// Render excluded entries at the bottom, visually de-emphasized
    Dim,
}

impl fmt::Display for ExcludedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hide => write!(f, "hide"),
            Self::Dim => write!(f, "dim"),
        }
    }
}

impl FromStr for ExcludedPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hide" => Ok(Self::Hide),
            "dim" => Ok(Self::Dim),
            _ => Err(format!("Invalid excluded policy: {}", s)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SetrankConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ranking.excluded, ExcludedPolicy::Hide);
        assert_eq!(config.ranking.limit, None);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = SetrankConfig {
            ranking: RankingConfig {
                limit: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excluded_policy_round_trip() {
        assert_eq!("hide".parse::<ExcludedPolicy>().unwrap(), ExcludedPolicy::Hide);
        assert_eq!("DIM".parse::<ExcludedPolicy>().unwrap(), ExcludedPolicy::Dim);
        assert!("drop".parse::<ExcludedPolicy>().is_err());
        assert_eq!(ExcludedPolicy::Dim.to_string(), "dim");
    }

    #[test]
    fn test_config_deserializes_from_toml_fragment() {
        let toml = r#"
            [ranking]
            limit = 25
            excluded = "dim"

            [logging]
            level = "debug"
            format = "compact"
        "#;
        let config: SetrankConfig = toml_fragment(toml);
        assert_eq!(config.ranking.limit, Some(25));
        assert_eq!(config.ranking.excluded, ExcludedPolicy::Dim);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    fn toml_fragment(toml: &str) -> SetrankConfig {
        use figment::providers::{Format, Toml};
        figment::Figment::new()
            .merge(figment::providers::Serialized::defaults(SetrankConfig::default()))
            .merge(Toml::string(toml))
            .extract()
            .unwrap()
    }
}
