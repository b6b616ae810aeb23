//! Error types for change event sources.

use thiserror::Error;

/// Error type for change event sources.
///
/// Any of these ends the stream that reported it.
#[derive(Debug, Error)]
pub enum EventError {
    /// The OS change notification subscription failed.
    #[error("Interface watcher failed: {message}")]
    Watcher {
        /// Description of the platform failure.
        message: String,
    },

    /// The notification channel closed without being asked to.
    #[error("Change event source closed unexpectedly")]
    Closed,
}
