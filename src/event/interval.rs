//! Periodic change events.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tokio_stream::Stream;

use super::{ChangeSource, EventError};

/// Longest supported period; longer ones are clamped so deadline
/// arithmetic cannot overflow.
pub const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Emits an event every `period`, for platforms or setups without change
/// notifications and as a safety net for missed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSource {
    period: Duration,
    immediate: bool,
}

impl IntervalSource {
    /// Ticks immediately, then every `period`.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            immediate: true,
        }
    }

    /// First tick after one full `period`.
    ///
    /// Used next to a source that already triggers the initial scan.
    #[must_use]
    pub const fn delayed(period: Duration) -> Self {
        Self {
            period,
            immediate: false,
        }
    }

    /// Returns the tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}

impl ChangeSource for IntervalSource {
    type Stream = IntervalStream;

    /// # Panics
    ///
    /// Panics if the period is zero or if called outside a tokio runtime.
    fn into_stream(self) -> Self::Stream {
        let period = self.period.min(MAX_PERIOD);
        let start = if self.immediate {
            Instant::now()
        } else {
            Instant::now() + period
        };
        let mut interval = interval_at(start, period);
        // A slow scan must not be followed by a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        IntervalStream { interval }
    }
}

/// Stream returned by [`IntervalSource::into_stream`]; never ends.
#[derive(Debug)]
pub struct IntervalStream {
    interval: Interval,
}

impl Stream for IntervalStream {
    type Item = Result<(), EventError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.interval.poll_tick(cx).map(|_| Some(Ok(())))
    }
}
