//! Shared test fixtures for change sources.

use super::{ChangeSource, EventError};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::Stream;

/// What the mock stream does once its queued events are consumed.
#[derive(Debug)]
enum Tail {
    /// Stream ends.
    End,
    /// Stream stays pending forever.
    Hang,
    /// Stream forwards whatever the paired sender sends; ends when the
    /// sender is dropped.
    Channel(mpsc::UnboundedReceiver<Result<(), EventError>>),
}

/// Mock change source with scripted events.
///
/// Records whether its stream has been dropped, so tests can assert that
/// the subscription is released.
#[derive(Debug)]
pub struct MockSource {
    events: VecDeque<Result<(), EventError>>,
    tail: Tail,
    released: Arc<AtomicBool>,
}

impl MockSource {
    /// Yields `events`, then ends.
    pub fn new(events: Vec<Result<(), EventError>>) -> Self {
        Self::with_tail(events, Tail::End)
    }

    /// Yields `count` change events, then ends.
    pub fn ticks(count: usize) -> Self {
        Self::new((0..count).map(|_| Ok(())).collect())
    }

    /// Yields `events`, then stays pending forever.
    pub fn hanging(events: Vec<Result<(), EventError>>) -> Self {
        Self::with_tail(events, Tail::Hang)
    }

    /// Source driven by the returned sender.
    pub fn channel() -> (mpsc::UnboundedSender<Result<(), EventError>>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self::with_tail(Vec::new(), Tail::Channel(receiver)))
    }

    fn with_tail(events: Vec<Result<(), EventError>>, tail: Tail) -> Self {
        Self {
            events: events.into(),
            tail,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag set once the stream produced by this source is dropped.
    pub fn released_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.released)
    }
}

impl ChangeSource for MockSource {
    type Stream = MockStream;

    fn into_stream(self) -> Self::Stream {
        MockStream {
            events: self.events,
            tail: self.tail,
            released: self.released,
        }
    }
}

/// Stream produced by [`MockSource`].
#[derive(Debug)]
pub struct MockStream {
    events: VecDeque<Result<(), EventError>>,
    tail: Tail,
    released: Arc<AtomicBool>,
}

impl Stream for MockStream {
    type Item = Result<(), EventError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(event) = self.events.pop_front() {
            return Poll::Ready(Some(event));
        }

        match &mut self.tail {
            Tail::End => Poll::Ready(None),
            Tail::Hang => Poll::Pending,
            Tail::Channel(receiver) => receiver.poll_recv(cx),
        }
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}
