//! Carousel error types

use std::io;
use thiserror::Error;

/// Errors that can occur when loading or validating a carousel configuration
///
/// Navigation itself never fails: out-of-range indices are clamped and late
/// signals after teardown are ignored.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("Config parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value the carousel cannot work with
    #[error("Invalid option `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
