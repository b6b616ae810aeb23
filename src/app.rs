//! Process plumbing for the `ifscan` binary: exit statuses, logging and
//! hints printed after a configuration error.

use ifscan::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Process exit statuses.
pub mod exit_code {
    use std::process::ExitCode;

    /// Scan finished or the scanner was shut down cleanly.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Arguments or config file rejected before any scan ran (status 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Scanner stopped on its own (status 2): the change source failed or
    /// ended, or an observer failed under the propagate policy.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Suggestion for fixing `error`, if there is a useful one.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            Some("Run 'ifscan init' to write a commented config template.")
        }
        ConfigError::InvalidRegex { .. } => Some(
            "Interface filters are regular expressions; escape literal dots as '\\.' and anchor with '^' or '$'.",
        ),
        ConfigError::InvalidDuration { field: f, .. } if *f == field::POLL_INTERVAL => {
            Some("poll_interval is in whole seconds, between 1 and one year.")
        }
        ConfigError::InvalidDuration { field: f, .. } if *f == field::PROBE_TIMEOUT => {
            Some("probe_timeout is in whole seconds, between 1 and 3600.")
        }
        ConfigError::HomeDirNotFound { .. } => {
            Some("No home directory is known; give the output file as an absolute path.")
        }
        _ => None,
    }
}

/// Prints the hint for `error` to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the level picked
/// from `verbose`.
///
/// Logs go to stderr; stdout carries only scan results.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
