//! External command execution for platform probes.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Interval between exit checks while waiting for a child process.
const WAIT_STEP: Duration = Duration::from_millis(10);

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Raw standard output.
    pub stdout: Vec<u8>,
}

impl CommandOutput {
    /// Returns stdout decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Error type for command execution.
///
/// Probes never surface these; they log them and fall back to the
/// conservative answer.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started (usually: not installed).
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child failed.
    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program did not finish in time and was killed.
    #[error("'{program}' timed out after {}ms", timeout.as_millis())]
    TimedOut {
        /// Program that was invoked.
        program: String,
        /// The timeout that expired.
        timeout: Duration,
    },
}

/// Runs platform utilities on behalf of the probes.
///
/// Abstracted so probe parsing logic can be tested against canned output.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and captures its standard output.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the program cannot be started, cannot be
    /// waited for, or exceeds the runner's timeout. A non-zero exit status
    /// is not an error; it is reported through [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// Production [`CommandRunner`] spawning real processes with a timeout.
#[derive(Debug, Clone, Copy)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Creates a runner that kills commands running longer than `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Drain stdout concurrently so a chatty child cannot block on a full pipe.
        let stdout = child.stdout.take();
        let reader = thread::spawn(move || {
            let mut buffer = Vec::new();
            if let Some(mut pipe) = stdout {
                let _ = pipe.read_to_end(&mut buffer);
            }
            buffer
        });

        // No deadline when the timeout is beyond what `Instant` can represent.
        let deadline = Instant::now().checked_add(self.timeout);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if deadline.is_some_and(|d| Instant::now() >= d) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CommandError::TimedOut {
                        program: program.to_string(),
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(WAIT_STEP),
                Err(source) => {
                    let _ = child.kill();
                    return Err(CommandError::Wait {
                        program: program.to_string(),
                        source,
                    });
                }
            }
        };

        Ok(CommandOutput {
            success: status.success(),
            stdout: reader.join().unwrap_or_default(),
        })
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for Box<T> {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        (**self).run(program, args)
    }
}

/// Runs a command and returns its stdout only if it exited successfully.
///
/// Every failure is logged at debug level and collapses to `None`.
pub(crate) fn capture_stdout<R: CommandRunner + ?Sized>(
    runner: &R,
    program: &str,
    args: &[&str],
) -> Option<String> {
    match runner.run(program, args) {
        Ok(output) if output.success => Some(output.stdout_lossy()),
        Ok(_) => {
            tracing::debug!("{program} {} exited with failure", args.join(" "));
            None
        }
        Err(e) => {
            tracing::debug!("{e}");
            None
        }
    }
}
