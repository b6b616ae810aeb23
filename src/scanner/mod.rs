//! Scanner layer: from enumerated interfaces to dispatched scan results.
//!
//! This module provides:
//! - Result types ([`ScanResult`], [`ScanResultItem`], [`InterfaceKind`])
//! - Relevance selection ([`find_relevant_interfaces`])
//! - One synchronous scan pass ([`ScanEngine`])
//! - The change-driven scanner and its observers ([`NetworkScanner`],
//!   [`ScanObserver`], [`ObserverHandle`], [`ObserverGuard`])
//! - Error handling ([`ScanError`], [`ObserverError`], [`RunError`])

mod engine;
mod error;
mod item;
mod network_scanner;
mod observer;
mod relevance;

#[cfg(test)]
pub(crate) mod test_fixtures;


pub use engine::ScanEngine;
pub use error::{ObserverError, RunError, ScanError};
pub use item::{InterfaceKind, ScanResult, ScanResultItem};
pub use network_scanner::{NetworkScanner, ScannerState};
pub use observer::{ObserverFailurePolicy, ObserverGuard, ObserverHandle, ScanObserver};
pub use relevance::{RelevantInterface, find_relevant_interfaces};
