//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Interface name filter configuration
    #[serde(default)]
    pub filter: FilterSection,

    /// Scanning configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Result output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Interface filter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Regex patterns for interfaces to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for interfaces to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Scanning configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Polling interval in seconds
    pub poll_interval: Option<u64>,

    /// Disable OS change notifications, use polling only
    #[serde(default)]
    pub poll_only: bool,

    /// Timeout for platform probe commands in seconds
    pub probe_timeout: Option<u64>,

    /// Observer failure policy: "propagate" or "isolate"
    pub observer_failure: Option<String>,
}

/// Result output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// File receiving the latest result as JSON
    pub file: Option<PathBuf>,

    /// Standard output format: "text" or "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ifscan configuration file

[filter]
# Regex patterns for interfaces to include (empty = all relevant interfaces)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^en", "^wl"]

# Regex patterns for interfaces to exclude
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^docker", "^veth"]

[monitor]
# Polling interval in seconds (default: 60)
poll_interval = 60

# Disable OS change notifications, use polling only
# poll_only = false

# Timeout for platform probe commands in seconds (default: 3)
# probe_timeout = 3

# What to do when an observer fails (default: "propagate")
#   "propagate" - stop scanning and exit with the error
#   "isolate"   - log the failure and keep going
# observer_failure = "propagate"

[output]
# Write the latest result as JSON after every scan ("~" is expanded)
# file = "~/.cache/ifscan/result.json"

# Standard output format: "text" or "json" (default: "text")
# format = "text"
"#
    .to_string()
}
