//! Shared test fixtures for probe tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::command::{CommandError, CommandOutput, CommandRunner};

/// Canned responses keyed by the full command line (`program arg1 arg2`).
///
/// Unknown command lines behave like a program that is not installed.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<String>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command line that exits 0 with `stdout`.
    pub fn succeeds(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses.insert(
            command_line.to_string(),
            CommandOutput {
                success: true,
                stdout: stdout.as_bytes().to_vec(),
            },
        );
        self
    }

    /// Registers a command line that exits non-zero with `stdout`.
    pub fn fails(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses.insert(
            command_line.to_string(),
            CommandOutput {
                success: false,
                stdout: stdout.as_bytes().to_vec(),
            },
        );
        self
    }

    /// Returns every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(command_line.clone());

        self.responses
            .get(&command_line)
            .cloned()
            .ok_or_else(|| CommandError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            })
    }
}
