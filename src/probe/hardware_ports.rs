//! Short-lived cache of macOS hardware port descriptions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::time::Clock;

/// How long a fetched device → hardware port map stays valid.
pub const HARDWARE_PORT_TTL: Duration = Duration::from_secs(5);

/// Device name → hardware port description (e.g. `en0` → `Wi-Fi`).
pub type HardwarePorts = HashMap<String, String>;

/// Lazily refreshed device → hardware port map with an expiry timestamp.
///
/// One scan pass probes several interfaces back to back; the cache keeps
/// that burst down to a single `networksetup` invocation.
#[derive(Debug)]
pub struct HardwarePortCache<C> {
    clock: C,
    ttl: Duration,
    fetched_at: Option<Instant>,
    ports: HardwarePorts,
}

impl<C: Clock> HardwarePortCache<C> {
    /// Creates an empty cache with the default TTL.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_ttl(clock, HARDWARE_PORT_TTL)
    }

    /// Creates an empty cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(clock: C, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            fetched_at: None,
            ports: HardwarePorts::new(),
        }
    }

    /// Returns the port description of `device`, calling `fetch` first if the
    /// cached map is missing or older than the TTL.
    pub fn port_of(
        &mut self,
        device: &str,
        fetch: impl FnOnce() -> HardwarePorts,
    ) -> Option<String> {
        let now = self.clock.now();
        let fresh = self
            .fetched_at
            .is_some_and(|at| now.saturating_duration_since(at) <= self.ttl);

        if !fresh {
            self.ports = fetch();
            self.fetched_at = Some(now);
        }

        self.ports.get(device).cloned()
    }
}

/// Parses `networksetup -listallhardwareports` output.
///
/// The output is a sequence of blank-line separated blocks; a `Hardware
/// Port:` line followed by a `Device:` line yields one entry.
pub fn parse_hardware_ports(output: &str) -> HardwarePorts {
    let mut result = HardwarePorts::new();
    let mut port: Option<String> = None;

    for line in output.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("Hardware Port: ") {
            port = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("Device: ") {
            if let Some(port) = port.take().filter(|p| !p.is_empty()) {
                result.insert(rest.trim().to_string(), port);
            }
        } else if line.is_empty() {
            port = None;
        }
    }

    result
}
