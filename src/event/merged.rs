//! Change notifications backed by a polling safety net.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio_stream::Stream;

use super::{ChangeSource, EventError};

/// Combines a notification source with a fallback source.
///
/// Events from either source are forwarded. If the primary source fails
/// or ends, the stream degrades to the fallback alone; the degradation is
/// permanent for the lifetime of the stream. Fallback failures are
/// forwarded as-is.
///
/// # Example
///
/// ```ignore
/// use ifscan::event::{IntervalSource, MergedSource, WatcherSource};
///
/// let source = MergedSource::new(
///     WatcherSource::new(),
///     IntervalSource::delayed(Duration::from_secs(60)),
/// );
/// scanner.run(source).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MergedSource<A, B> {
    primary: A,
    fallback: B,
}

impl<A: ChangeSource, B: ChangeSource> MergedSource<A, B> {
    #[must_use]
    pub const fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: ChangeSource, B: ChangeSource> ChangeSource for MergedSource<A, B> {
    type Stream = MergedStream<A::Stream, B::Stream>;

    fn into_stream(self) -> Self::Stream {
        MergedStream {
            primary: Some(self.primary.into_stream()),
            fallback: self.fallback.into_stream(),
        }
    }
}

/// Stream returned by [`MergedSource::into_stream`].
#[derive(Debug)]
pub struct MergedStream<S, T> {
    /// `None` once the primary source has failed or ended.
    primary: Option<S>,
    fallback: T,
}

impl<S, T> MergedStream<S, T> {
    /// Returns true once only the fallback source is left.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.primary.is_none()
    }
}

impl<S, T> Stream for MergedStream<S, T>
where
    S: Stream<Item = Result<(), EventError>> + Unpin,
    T: Stream<Item = Result<(), EventError>> + Unpin,
{
    type Item = Result<(), EventError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Primary first, for responsiveness.
        if let Some(primary) = self.primary.as_mut() {
            match Pin::new(primary).poll_next(cx) {
                Poll::Ready(Some(Ok(()))) => return Poll::Ready(Some(Ok(()))),
                Poll::Ready(Some(Err(e))) => {
                    tracing::warn!("Change notifications failed, falling back to polling: {e}");
                    self.primary = None;
                }
                Poll::Ready(None) => {
                    tracing::warn!("Change notifications ended, falling back to polling");
                    self.primary = None;
                }
                Poll::Pending => {}
            }
        }

        Pin::new(&mut self.fallback).poll_next(cx)
    }
}
