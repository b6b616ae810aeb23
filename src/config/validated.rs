//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::network::filter::{FilterChain, NameRegexFilter};
use crate::output::OutputFormat;
use crate::scanner::ObserverFailurePolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Interface name filter; empty when no patterns are configured
    pub filter: FilterChain,

    /// Polling interval
    pub poll_interval: Duration,

    /// Whether to use polling only (no OS change notifications)
    pub poll_only: bool,

    /// Timeout for platform probe commands
    pub probe_timeout: Duration,

    /// What the scanner does when an observer fails
    pub observer_failure: ObserverFailurePolicy,

    /// File receiving the latest result as JSON, with `~` expanded
    pub output_file: Option<PathBuf>,

    /// Standard output format
    pub format: OutputFormat,

    /// Scan once and exit
    pub once: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output_file_str = self
            .output_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ poll_interval: {}s, poll_only: {}, probe_timeout: {}s, \
             observer_failure: {}, output_file: {}, format: {}, once: {}, filters: {}+{} }}",
            self.poll_interval.as_secs(),
            self.poll_only,
            self.probe_timeout.as_secs(),
            self.observer_failure,
            output_file_str,
            self.format,
            self.once,
            self.filter.include_count(),
            self.filter.exclude_count(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Regex patterns are invalid
    /// - Duration values are zero or above their upper bound
    /// - The observer failure policy or output format is unknown
    /// - The output file starts with `~` and no home directory is known
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let filter = Self::build_filter(cli, toml)?;

        let poll_interval = resolve_seconds(
            cli.poll_interval,
            toml.and_then(|t| t.monitor.poll_interval),
            defaults::POLL_INTERVAL_SECS,
            defaults::MAX_POLL_INTERVAL_SECS,
            field::POLL_INTERVAL,
        )?;

        let probe_timeout = resolve_seconds(
            cli.probe_timeout,
            toml.and_then(|t| t.monitor.probe_timeout),
            defaults::PROBE_TIMEOUT_SECS,
            defaults::MAX_PROBE_TIMEOUT_SECS,
            field::PROBE_TIMEOUT,
        )?;

        // Flags only enable
        let poll_only = cli.poll_only || toml.is_some_and(|t| t.monitor.poll_only);

        let observer_failure = Self::resolve_observer_failure(cli, toml)?;
        let format = Self::resolve_format(cli, toml)?;
        let output_file = Self::resolve_output_file(cli, toml)?;

        Ok(Self {
            filter,
            poll_interval,
            poll_only,
            probe_timeout,
            observer_failure,
            output_file,
            format,
            once: cli.once,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn build_filter(cli: &Cli, toml: Option<&TomlConfig>) -> Result<FilterChain, ConfigError> {
        // CLI patterns replace TOML patterns, per list
        let includes = if cli.include_interfaces.is_empty() {
            toml.map_or(&[][..], |t| t.filter.include.as_slice())
        } else {
            cli.include_interfaces.as_slice()
        };

        let excludes = if cli.exclude_interfaces.is_empty() {
            toml.map_or(&[][..], |t| t.filter.exclude.as_slice())
        } else {
            cli.exclude_interfaces.as_slice()
        };

        let mut filter = FilterChain::new();
        for pattern in includes {
            filter = filter.include(compile(pattern)?);
        }
        for pattern in excludes {
            filter = filter.exclude(compile(pattern)?);
        }

        Ok(filter)
    }

    fn resolve_observer_failure(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ObserverFailurePolicy, ConfigError> {
        if let Some(policy) = cli.observer_failure {
            return Ok(policy);
        }

        toml.and_then(|t| t.monitor.observer_failure.as_deref())
            .map_or(Ok(ObserverFailurePolicy::default()), |value| {
                value.parse().map_err(|_| ConfigError::InvalidChoice {
                    field: field::OBSERVER_FAILURE,
                    value: value.to_string(),
                    expected: "propagate or isolate",
                })
            })
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputFormat, ConfigError> {
        if let Some(format) = cli.format {
            return Ok(format);
        }

        toml.and_then(|t| t.output.format.as_deref())
            .map_or(Ok(OutputFormat::default()), |value| {
                value.parse().map_err(|_| ConfigError::InvalidChoice {
                    field: field::FORMAT,
                    value: value.to_string(),
                    expected: "text or json",
                })
            })
    }

    fn resolve_output_file(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<PathBuf>, ConfigError> {
        // CLI takes precedence
        let path = cli
            .output_file
            .as_ref()
            .or_else(|| toml.and_then(|t| t.output.file.as_ref()));

        path.map(|p| expand_home(p, dirs::home_dir())).transpose()
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn compile(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Priority: CLI explicit > TOML > default. Accepts `1..=max` seconds.
fn resolve_seconds(
    cli: Option<u64>,
    toml: Option<u64>,
    default: u64,
    max: u64,
    field: &'static str,
) -> Result<Duration, ConfigError> {
    let seconds = cli.or(toml).unwrap_or(default);

    if seconds == 0 {
        return Err(ConfigError::zero_duration(field));
    }
    if seconds > max {
        return Err(ConfigError::duration_too_long(field, max));
    }

    Ok(Duration::from_secs(seconds))
}

/// Replaces a leading `~` component with `home`.
pub(super) fn expand_home(path: &Path, home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    home.map(|home| home.join(rest))
        .ok_or_else(|| ConfigError::HomeDirNotFound {
            path: path.to_path_buf(),
        })
}
