//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 60;

/// Default timeout for platform probe commands in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 3;

/// Longest accepted polling interval in seconds (one year).
pub const MAX_POLL_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

/// Longest accepted probe command timeout in seconds.
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 60 * 60;

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}

/// Default probe command timeout as Duration.
#[must_use]
pub const fn probe_timeout() -> Duration {
    Duration::from_secs(PROBE_TIMEOUT_SECS)
}
