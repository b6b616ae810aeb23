//! Application execution logic.
//!
//! This module wires the scanner to its observers and change source, and
//! runs it until a shutdown signal arrives.

use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::signal;

use ifscan::config::ValidatedConfig;
use ifscan::event::{ChangeSource, IntervalSource, MergedSource, WatcherSource};
use ifscan::network::InterfaceEnumerator;
use ifscan::network::platform::PlatformEnumerator;
use ifscan::output::{JsonFileWriter, OutputError, OutputFormat, render};
use ifscan::probe::{self, PlatformProbe};
use ifscan::scanner::{NetworkScanner, ObserverError, RunError, ScanEngine, ScanResult};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Scanner type used by the application.
type AppScanner = NetworkScanner<PlatformEnumerator, Box<dyn PlatformProbe>>;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// The scanner stopped with an error.
    #[error("Scanner failed: {0}")]
    Scanner(#[from] RunError),

    /// The change source ended although it should run until shutdown.
    #[error("Change event source ended unexpectedly")]
    SourceExhausted,
}

/// Runtime options extracted from validated config.
///
/// Holds only the fields needed after the scanner is built, so the
/// config's `filter` can be moved into the engine separately.
struct RuntimeOptions {
    poll_interval: Duration,
    poll_only: bool,
    output_file: Option<PathBuf>,
    format: OutputFormat,
    once: bool,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            poll_only: config.poll_only,
            output_file: config.output_file.clone(),
            format: config.format,
            once: config.once,
        }
    }
}

/// Executes the application.
///
/// This function:
/// 1. Builds the scanner from the platform enumerator and probe
/// 2. Registers the stdout printer and, if configured, the result file writer
/// 3. Scans once (`--once`) or runs until a shutdown signal (Ctrl+C / SIGTERM)
///
/// # Errors
///
/// Returns an error if the scanner stops with an error or its change
/// source ends.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), AppError> {
    let options = RuntimeOptions::from(&config);
    let scanner = build_scanner(config);

    let _printer = scanner.observe(print_observer(options.format));
    let _writer = options.output_file.map(|path| {
        tracing::info!("Writing results to {}", path.display());
        scanner.observe(JsonFileWriter::new(path))
    });

    if options.once {
        scanner.scan_now().await?;
        return Ok(());
    }

    if options.poll_only {
        tracing::info!(
            "Polling-only mode enabled (interval: {}s)",
            options.poll_interval.as_secs()
        );
        let source = IntervalSource::new(options.poll_interval);
        run_until(&scanner, source, shutdown_signal()).await
    } else {
        tracing::info!(
            "Watch mode enabled (OS notifications + polling every {}s)",
            options.poll_interval.as_secs()
        );
        // The watcher's initial notification triggers the first scan.
        let source = MergedSource::new(
            WatcherSource::new(),
            IntervalSource::delayed(options.poll_interval),
        );
        run_until(&scanner, source, shutdown_signal()).await
    }
}

fn build_scanner(config: ValidatedConfig) -> AppScanner {
    let probe = probe::detect(config.probe_timeout);
    let mut engine = ScanEngine::new(PlatformEnumerator::new(), probe);
    if !config.filter.is_empty() {
        engine = engine.with_filter(config.filter);
    }

    NetworkScanner::new(engine).with_failure_policy(config.observer_failure)
}

/// Returns an observer printing every result to standard output.
fn print_observer(
    format: OutputFormat,
) -> impl Fn(&ScanResult) -> Result<(), ObserverError> + Send + Sync + 'static {
    move |result: &ScanResult| {
        let rendered = render(result, format).map_err(|e| ObserverError::new(e.to_string()))?;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", rendered.trim_end())
            .and_then(|()| stdout.flush())
            .map_err(|e| ObserverError::new(OutputError::Print(e).to_string()))
    }
}

/// Runs `scanner` against `source` until `shutdown` completes.
///
/// Dropping the run future on shutdown releases the source's subscription.
async fn run_until<E, P, S, F>(
    scanner: &NetworkScanner<E, P>,
    source: S,
    shutdown: F,
) -> Result<(), AppError>
where
    E: InterfaceEnumerator + 'static,
    P: PlatformProbe + 'static,
    S: ChangeSource,
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;

        () = shutdown => {
            tracing::info!("Shutdown signal received, stopping...");
            Ok(())
        }

        result = scanner.run(source) => {
            result?;
            Err(AppError::SourceExhausted)
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a signal handler cannot be installed, that signal is never reported.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
