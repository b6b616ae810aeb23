//! Configuration layer for ifscan.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For filter patterns (`include`, `exclude`), CLI patterns **replace** TOML
//! patterns entirely (not merged). Include and exclude lists are handled
//! independently: `--include-interface` replaces only the TOML includes.
//!
//! # Boolean Flag Semantics
//!
//! `--poll-only` uses OR semantics: if set `true` in either CLI or TOML, the
//! result is `true`. Flags only enable, they never disable.
//!
//! # CLI-Only Options
//!
//! `--once` and `--verbose` have no TOML counterpart.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
