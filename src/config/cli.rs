//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use crate::scanner::ObserverFailurePolicy;

/// ifscan: network interface scanner
///
/// Lists the relevant network interfaces, classifies them as wired or
/// wireless, reports their connection state, and rescans whenever the
/// system reports a network change.
#[derive(Debug, Parser)]
#[command(name = "ifscan")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Regex pattern for interfaces to include (can be specified multiple times)
    #[arg(long = "include-interface", value_name = "PATTERN")]
    pub include_interfaces: Vec<String>,

    /// Regex pattern for interfaces to exclude (can be specified multiple times)
    #[arg(long = "exclude-interface", value_name = "PATTERN")]
    pub exclude_interfaces: Vec<String>,

    /// Polling interval in seconds
    #[arg(long = "poll-interval")]
    pub poll_interval: Option<u64>,

    /// Disable OS change notifications, use polling only
    #[arg(long = "poll-only")]
    pub poll_only: bool,

    /// Timeout for platform probe commands in seconds
    #[arg(long = "probe-timeout")]
    pub probe_timeout: Option<u64>,

    /// What to do when an observer fails: propagate (stop) or isolate (log and continue)
    #[arg(long = "observer-failure", value_name = "POLICY")]
    pub observer_failure: Option<ObserverFailurePolicy>,

    /// Write the latest result as JSON to this file after every scan
    #[arg(long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Output format for standard output
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Scan once, print the result and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ifscan
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ifscan.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error
    /// instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown flags or invalid values.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
