//! Error types for the scanner layer.

use crate::event::EventError;
use crate::network::EnumerationError;
use thiserror::Error;

/// Error type for a single scan pass.
///
/// A failed pass never replaces the cached result.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Interface listing or address lookup failed.
    #[error("Failed to enumerate interfaces: {0}")]
    Enumeration(#[from] EnumerationError),

    /// The blocking worker running the pass panicked or was cancelled.
    #[error("Scan worker failed: {message}")]
    Worker {
        /// Description of the worker failure.
        message: String,
    },
}

/// Failure reported by a [`ScanObserver`](super::ScanObserver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    /// Creates an observer error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error type for [`NetworkScanner`](super::NetworkScanner) runs.
#[derive(Debug, Error)]
pub enum RunError {
    /// `run` was called while another `run` was still active.
    #[error("Scanner is already running")]
    AlreadyRunning,

    /// The change event source failed; the subscription has been released.
    #[error("Change event source failed: {0}")]
    EventSource(#[source] EventError),

    /// An observer failed under the propagate policy.
    #[error("Observer failed: {0}")]
    Observer(#[source] ObserverError),

    /// A one-off scan failed.
    ///
    /// Only returned by `scan_now`; inside `run` failed passes are logged
    /// and skipped.
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
}
