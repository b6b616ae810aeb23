//! OS interface change notifications via `netwatcher`.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio_stream::Stream;

use super::{ChangeSource, EventError};

/// Subscribes to the operating system's interface change notifications
/// (netlink on Linux, `SCDynamicStore` on macOS, IP Helper on Windows).
///
/// The first notification arrives right after subscribing and carries the
/// initial interface list, so it also triggers the initial scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatcherSource {
    _private: (),
}

impl WatcherSource {
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl ChangeSource for WatcherSource {
    type Stream = WatcherStream;

    fn into_stream(self) -> Self::Stream {
        let (sender, receiver) = mpsc::unbounded_channel();

        let subscription = netwatcher::watch_interfaces(move |update: netwatcher::Update| {
            tracing::trace!(
                "Interface update: {} interface(s), {} added, {} removed",
                update.interfaces.len(),
                update.diff.added.len(),
                update.diff.removed.len()
            );
            if sender.send(()).is_err() {
                tracing::trace!("Interface update dropped: stream already closed");
            }
        });

        match subscription {
            Ok(handle) => WatcherStream::new(receiver, Some(handle), None),
            Err(e) => WatcherStream::new(
                receiver,
                None,
                Some(EventError::Watcher {
                    message: format!("{e:?}"),
                }),
            ),
        }
    }
}

/// Stream of OS change notifications.
///
/// Owns the watch handle; dropping the stream unsubscribes.
pub struct WatcherStream {
    receiver: mpsc::UnboundedReceiver<()>,
    /// Dropping the handle ends the OS subscription.
    handle: Option<netwatcher::WatchHandle>,
    pending_error: Option<EventError>,
    terminated: bool,
}

impl WatcherStream {
    fn new(
        receiver: mpsc::UnboundedReceiver<()>,
        handle: Option<netwatcher::WatchHandle>,
        pending_error: Option<EventError>,
    ) -> Self {
        Self {
            receiver,
            handle,
            pending_error,
            terminated: false,
        }
    }
}

impl fmt::Debug for WatcherStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherStream")
            .field("subscribed", &self.handle.is_some())
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

impl Stream for WatcherStream {
    type Item = Result<(), EventError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.terminated {
            return Poll::Ready(None);
        }

        if let Some(error) = self.pending_error.take() {
            self.terminated = true;
            return Poll::Ready(Some(Err(error)));
        }

        match self.receiver.poll_recv(cx) {
            Poll::Ready(Some(())) => Poll::Ready(Some(Ok(()))),
            Poll::Ready(None) => {
                self.terminated = true;
                Poll::Ready(Some(Err(EventError::Closed)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
