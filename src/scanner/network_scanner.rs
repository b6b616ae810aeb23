//! The change-driven scanner.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio_stream::StreamExt;

use super::engine::ScanEngine;
use super::item::ScanResult;
use super::observer::{
    ObserverFailurePolicy, ObserverGuard, ObserverHandle, ObserverRegistry, ScanObserver, dispatch,
};
use super::{RunError, ScanError};
use crate::event::ChangeSource;
use crate::network::InterfaceEnumerator;
use crate::probe::PlatformProbe;

/// Lifecycle state of a [`NetworkScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    /// No `run` is active.
    Idle,
    /// A `run` is subscribed to change events.
    Running,
}

/// Rescans the system's interfaces on every change event and hands each
/// result to the registered observers.
///
/// # Concurrency
///
/// - Scan passes run on tokio's blocking pool and are strictly serialized:
///   the next event is only read after the previous pass has been
///   dispatched, and [`scan_now`](Self::scan_now) waits for any pass in
///   flight.
/// - The cached result is replaced by swapping an `Arc`, so
///   [`last_result`](Self::last_result) sees either the old or the new
///   complete result.
/// - Observers may be added or removed at any time; each dispatch works on
///   a snapshot of the registry taken when it starts.
///
/// # Example
///
/// ```ignore
/// use ifscan::event::IntervalSource;
/// use ifscan::scanner::{NetworkScanner, ScanEngine};
///
/// let scanner = NetworkScanner::new(ScanEngine::new(enumerator, probe));
/// let _handle = scanner.add_observer(|result: &ifscan::scanner::ScanResult| {
///     println!("{} interface(s)", result.len());
///     Ok(())
/// });
/// scanner.run(IntervalSource::new(Duration::from_secs(60))).await?;
/// ```
#[derive(Debug)]
pub struct NetworkScanner<E, P> {
    engine: Arc<ScanEngine<E, P>>,
    last_result: RwLock<Arc<ScanResult>>,
    observers: Arc<ObserverRegistry>,
    failure_policy: ObserverFailurePolicy,
    running: AtomicBool,
    /// Held by the blocking worker for the whole pass.
    pass_lock: Arc<Mutex<()>>,
}

impl<E, P> NetworkScanner<E, P>
where
    E: InterfaceEnumerator + 'static,
    P: PlatformProbe + 'static,
{
    /// Creates an idle scanner with an empty cached result.
    #[must_use]
    pub fn new(engine: ScanEngine<E, P>) -> Self {
        Self {
            engine: Arc::new(engine),
            last_result: RwLock::new(Arc::new(ScanResult::new())),
            observers: Arc::new(ObserverRegistry::default()),
            failure_policy: ObserverFailurePolicy::default(),
            running: AtomicBool::new(false),
            pass_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Sets how observer failures are handled.
    #[must_use]
    pub const fn with_failure_policy(mut self, policy: ObserverFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Returns the observer failure policy.
    #[must_use]
    pub const fn failure_policy(&self) -> ObserverFailurePolicy {
        self.failure_policy
    }

    /// Returns the scan engine.
    #[must_use]
    pub fn engine(&self) -> &ScanEngine<E, P> {
        &self.engine
    }

    #[must_use]
    pub fn state(&self) -> ScannerState {
        if self.running.load(Ordering::SeqCst) {
            ScannerState::Running
        } else {
            ScannerState::Idle
        }
    }

    /// Registers an observer, after any already registered ones.
    ///
    /// The same observer may be registered several times; it is then
    /// notified once per registration.
    pub fn add_observer<O: ScanObserver + 'static>(&self, observer: O) -> ObserverHandle {
        self.observers.register(Arc::new(observer))
    }

    /// Registers an observer for as long as the returned guard lives.
    pub fn observe<O: ScanObserver + 'static>(&self, observer: O) -> ObserverGuard {
        self.add_observer(observer).into_guard()
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Returns a copy of the most recent result; empty until the first
    /// successful scan.
    #[must_use]
    pub fn last_result(&self) -> ScanResult {
        ScanResult::clone(&self.last_result.read())
    }

    /// Scans once, caches and dispatches the result, and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Scan`] if the pass fails (the cache is left
    /// untouched) and [`RunError::Observer`] if an observer fails under
    /// [`ObserverFailurePolicy::Propagate`].
    pub async fn scan_now(&self) -> Result<ScanResult, RunError> {
        let (result, _pass) = self.scan_on_worker().await?;
        self.publish(&result)?;
        Ok(ScanResult::clone(&result))
    }

    /// Subscribes to `source` and scans on every event until the source is
    /// exhausted.
    ///
    /// A failed scan pass is logged and skipped; the previous result stays
    /// cached. The subscription is released on every exit path, including
    /// when the returned future is dropped.
    ///
    /// # Errors
    ///
    /// - [`RunError::AlreadyRunning`] if another `run` is active
    /// - [`RunError::EventSource`] if the source reports a failure
    /// - [`RunError::Observer`] if an observer fails under
    ///   [`ObserverFailurePolicy::Propagate`]
    pub async fn run<S: ChangeSource>(&self, source: S) -> Result<(), RunError> {
        let _running = RunningGuard::acquire(&self.running).ok_or(RunError::AlreadyRunning)?;
        tracing::info!("Network scanner started");

        let mut events = source.into_stream();
        while let Some(event) = events.next().await {
            event.map_err(RunError::EventSource)?;
            tracing::debug!("Change event received, scanning");
            self.run_pass().await?;
        }

        tracing::debug!("Change event source exhausted");
        Ok(())
    }

    async fn run_pass(&self) -> Result<(), RunError> {
        match self.scan_on_worker().await {
            Ok((result, _pass)) => self.publish(&result),
            Err(e) => {
                tracing::error!("Scan failed, keeping previous result: {e}");
                Ok(())
            }
        }
    }

    /// Runs one pass on the blocking pool and hands back the pass lock so
    /// the caller can publish before the next pass starts.
    ///
    /// The lock travels into the worker: if this future is dropped, the
    /// pass still holds it until the worker returns.
    async fn scan_on_worker(&self) -> Result<(Arc<ScanResult>, OwnedMutexGuard<()>), ScanError> {
        let pass = Arc::clone(&self.pass_lock).lock_owned().await;
        let engine = Arc::clone(&self.engine);

        let (result, pass) = tokio::task::spawn_blocking(move || (engine.scan(), pass))
            .await
            .map_err(|e| ScanError::Worker {
                message: e.to_string(),
            })?;
        Ok((Arc::new(result?), pass))
    }

    /// Swaps the cache, then notifies a snapshot of the observers.
    fn publish(&self, result: &Arc<ScanResult>) -> Result<(), RunError> {
        *self.last_result.write() = Arc::clone(result);

        let observers = self.observers.snapshot();
        tracing::debug!(
            "Dispatching {} interface(s) to {} observer(s)",
            result.len(),
            observers.len()
        );
        dispatch(&observers, result, self.failure_policy).map_err(RunError::Observer)
    }
}

/// Holds the running flag for the lifetime of one `run`.
struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        tracing::info!("Network scanner stopped");
    }
}
