//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid regex pattern for interface filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A value outside the accepted set for an enumerated option.
    #[error("Invalid value '{value}' for {field}: expected {expected}")]
    InvalidChoice {
        /// Name of the field
        field: &'static str,
        /// The value provided
        value: String,
        /// Accepted values
        expected: &'static str,
    },

    /// `~` could not be expanded because the home directory is unknown.
    #[error("Cannot expand '{}': home directory not found", path.display())]
    HomeDirNotFound {
        /// The path starting with `~`
        path: PathBuf,
    },
}

/// Well-known field names used in errors.
pub mod field {
    /// The polling interval field.
    pub const POLL_INTERVAL: &str = "poll_interval";
    /// The probe timeout field.
    pub const PROBE_TIMEOUT: &str = "probe_timeout";
    /// The observer failure policy field.
    pub const OBSERVER_FAILURE: &str = "observer_failure";
    /// The output format field.
    pub const FORMAT: &str = "format";
}

impl ConfigError {
    /// Creates an `InvalidDuration` error for a zero value.
    #[must_use]
    pub fn zero_duration(field: &'static str) -> Self {
        Self::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        }
    }

    /// Creates an `InvalidDuration` error for a value above `max` seconds.
    #[must_use]
    pub fn duration_too_long(field: &'static str, max: u64) -> Self {
        Self::InvalidDuration {
            field,
            reason: format!("must be at most {max} seconds"),
        }
    }
}
