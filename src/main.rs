//! `ifscan` command-line entry point.
//!
//! Either writes a config template (`ifscan init`) or loads the
//! configuration and hands it to the scanner runtime in [`run`].

use ifscan::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::path::Path;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Some(Command::Init { output }) = &cli.command {
        return write_template(output);
    }

    // Logging is not up yet, so config errors go straight to stderr
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ifscan: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::info!("{config}");

    scan(config)
}

/// `ifscan init`: writes the commented template to `output`.
fn write_template(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("ifscan: {e}");
        return exit_code::CONFIG_ERROR;
    }

    println!("Wrote config template to {}", output.display());
    exit_code::SUCCESS
}

/// Scans once or monitors until shutdown, depending on `config.once`.
#[cfg(not(tarpaulin_include))]
fn scan(config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("ifscan: cannot start async runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    if let Err(e) = runtime.block_on(run::execute(config)) {
        tracing::error!("Scanner stopped: {e}");
        return exit_code::runtime_error();
    }
    exit_code::SUCCESS
}
