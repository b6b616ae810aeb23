//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait that allows injecting mock clocks
//! in tests while using the real monotonic clock in production. Only expiry
//! bookkeeping depends on it, so it deals in [`Instant`] rather than wall time.

use std::sync::Arc;
use std::time::Instant;

/// Abstraction over the monotonic clock for testability.
///
/// # Example
///
/// ```
/// use ifscan::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let earlier = clock.now();
/// assert!(clock.now() >= earlier);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Production clock delegating to [`Instant::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
pub mod mock {
    //! Controllable clock shared by tests across the crate.

    use super::Clock;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{Duration, Instant};

    /// A clock that only moves when told to.
    #[derive(Debug)]
    pub struct MockClock {
        base: Instant,
        offset_millis: AtomicU64,
    }

    impl MockClock {
        pub fn new() -> Self {
            Self {
                base: Instant::now(),
                offset_millis: AtomicU64::new(0),
            }
        }

        pub fn advance(&self, by: Duration) {
            let millis = u64::try_from(by.as_millis()).unwrap();
            self.offset_millis.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            self.base + Duration::from_millis(self.offset_millis.load(Ordering::SeqCst))
        }
    }
}
