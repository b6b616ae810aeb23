//! Error types for rendering and writing results.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to serialize the result to JSON.
    #[error("Failed to serialize scan result: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Failed to write the result file.
    #[error("Failed to write result file '{}': {source}", path.display())]
    Write {
        /// Destination of the write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to standard output.
    #[error("Failed to print scan result: {0}")]
    Print(#[source] io::Error),
}
