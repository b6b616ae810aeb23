//! Change event sources that drive the scanner.
//!
//! This module provides:
//! - The source abstraction ([`ChangeSource`]) and its error type ([`EventError`])
//! - OS interface change notifications ([`WatcherSource`])
//! - Periodic ticks ([`IntervalSource`])
//! - Notifications with a polling safety net ([`MergedSource`])

mod error;
mod interval;
mod merged;
mod watcher;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::EventError;
pub use interval::{IntervalSource, IntervalStream, MAX_PERIOD};
pub use merged::{MergedSource, MergedStream};
pub use watcher::{WatcherSource, WatcherStream};

use tokio_stream::Stream;

/// Producer of "something may have changed" notifications.
///
/// # One-time Semantics
///
/// [`into_stream`](Self::into_stream) consumes `self`: it acquires the
/// subscription, and dropping the stream releases it.
///
/// # Stream Items
///
/// - `Ok(())`: a change may have happened; the consumer should rescan
/// - `Err(EventError)`: the source failed and will not recover
///
/// The end of the stream means the source is exhausted.
pub trait ChangeSource: Send {
    /// The stream type returned by `into_stream`.
    type Stream: Stream<Item = Result<(), EventError>> + Send + Unpin;

    /// Subscribes and converts this source into a notification stream.
    fn into_stream(self) -> Self::Stream;
}
