//! Configuration system for setrank.
//!
//! This module provides a flexible configuration system that supports loading
//! configuration from multiple sources (files, environment variables, etc.)
//! with proper validation and defaults. None of it feeds the scoring math:
//! the ranking functions stay pure, and configuration only steers the
//! caller-facing knobs (result limit, excluded-entry presentation, logging).

mod loader;
mod models;

pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "setrank.toml",
    "setrank.json",
    ".setrank/config.toml",
    ".setrank/config.json",
];

/// Environment variable prefix for setrank configuration
pub const ENV_PREFIX: &str = "SETRANK_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),

    /// General error
    #[error("{0}")]
    Other(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
