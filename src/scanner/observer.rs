//! Observer registration and dispatch.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::ObserverError;
use super::item::ScanResult;

/// Receiver of every completed scan result.
///
/// Called synchronously from the scan loop, so a slow observer delays the
/// next scan.
pub trait ScanObserver: Send + Sync {
    /// Handles one scan result.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] on failure; what happens next depends on
    /// the scanner's [`ObserverFailurePolicy`].
    fn notify(&self, result: &ScanResult) -> Result<(), ObserverError>;
}

impl<F> ScanObserver for F
where
    F: Fn(&ScanResult) -> Result<(), ObserverError> + Send + Sync,
{
    fn notify(&self, result: &ScanResult) -> Result<(), ObserverError> {
        self(result)
    }
}

/// What the scanner does when an observer fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObserverFailurePolicy {
    /// Stop dispatching and end the run with the observer's error.
    #[default]
    Propagate,
    /// Log the failure and keep going with the remaining observers.
    Isolate,
}

impl fmt::Display for ObserverFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propagate => write!(f, "propagate"),
            Self::Isolate => write!(f, "isolate"),
        }
    }
}

impl FromStr for ObserverFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "isolate" => Ok(Self::Isolate),
            other => Err(format!(
                "unknown observer failure policy '{other}' (expected 'propagate' or 'isolate')"
            )),
        }
    }
}

type ObserverId = u64;

/// Registered observers in registration order.
#[derive(Default)]
pub(super) struct ObserverRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: ObserverId,
    entries: Vec<(ObserverId, Arc<dyn ScanObserver>)>,
}

impl ObserverRegistry {
    pub(super) fn register(self: &Arc<Self>, observer: Arc<dyn ScanObserver>) -> ObserverHandle {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, observer));

        ObserverHandle {
            id,
            registry: Arc::downgrade(self),
        }
    }

    fn remove(&self, id: ObserverId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|(entry_id, _)| *entry_id != id);
        inner.entries.len() != before
    }

    /// Copies the current observers so dispatch runs without the lock held.
    pub(super) fn snapshot(&self) -> Vec<Arc<dyn ScanObserver>> {
        self.inner
            .lock()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }

    pub(super) fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

/// Notifies every observer in `observers`, applying `policy` to failures.
pub(super) fn dispatch(
    observers: &[Arc<dyn ScanObserver>],
    result: &ScanResult,
    policy: ObserverFailurePolicy,
) -> Result<(), ObserverError> {
    for (position, observer) in observers.iter().enumerate() {
        if let Err(e) = observer.notify(result) {
            match policy {
                ObserverFailurePolicy::Propagate => return Err(e),
                ObserverFailurePolicy::Isolate => {
                    tracing::warn!("Observer #{position} failed: {e}");
                }
            }
        }
    }
    Ok(())
}

/// Deregistration handle returned by
/// [`NetworkScanner::add_observer`](super::NetworkScanner::add_observer).
///
/// Dropping the handle keeps the observer registered; call
/// [`remove`](Self::remove) to deregister.
#[derive(Debug, Clone)]
pub struct ObserverHandle {
    id: ObserverId,
    registry: Weak<ObserverRegistry>,
}

impl ObserverHandle {
    /// Deregisters the observer.
    ///
    /// Returns true if this call removed it. Removing twice, or after the
    /// scanner is gone, does nothing and returns false.
    pub fn remove(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.remove(self.id))
    }

    /// Turns the handle into a guard that deregisters on drop.
    #[must_use]
    pub const fn into_guard(self) -> ObserverGuard {
        ObserverGuard { handle: self }
    }
}

/// Scoped registration: the observer is removed when the guard drops.
#[derive(Debug)]
#[must_use = "the observer is removed as soon as the guard is dropped"]
pub struct ObserverGuard {
    handle: ObserverHandle,
}

impl ObserverGuard {
    /// Returns the underlying handle.
    pub const fn handle(&self) -> &ObserverHandle {
        &self.handle
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.handle.remove();
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}
