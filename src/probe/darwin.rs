//! macOS probes backed by `networksetup` and `ifconfig`.

use parking_lot::Mutex;

use super::command::{CommandRunner, capture_stdout};
use super::hardware_ports::{HardwarePortCache, HardwarePorts, parse_hardware_ports};
use super::{PlatformProbe, is_safe_interface_name};
use crate::time::{Clock, SystemClock};

const AIRPORT_PREFIX: &str = "Current Wi-Fi Network: ";

/// macOS implementation of [`PlatformProbe`].
///
/// Classification relies on the hardware port descriptions reported by
/// `networksetup -listallhardwareports`, cached for a few seconds.
#[derive(Debug)]
pub struct DarwinProbe<R, C = SystemClock> {
    runner: R,
    ports: Mutex<HardwarePortCache<C>>,
}

impl<R: CommandRunner> DarwinProbe<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self::with_clock(runner, SystemClock)
    }
}

impl<R: CommandRunner, C: Clock> DarwinProbe<R, C> {
    /// Creates a probe whose hardware port cache expires against `clock`.
    #[must_use]
    pub fn with_clock(runner: R, clock: C) -> Self {
        Self {
            runner,
            ports: Mutex::new(HardwarePortCache::new(clock)),
        }
    }

    fn hardware_port(&self, device: &str) -> Option<String> {
        self.ports
            .lock()
            .port_of(device, || self.fetch_hardware_ports())
    }

    fn fetch_hardware_ports(&self) -> HardwarePorts {
        capture_stdout(&self.runner, "networksetup", &["-listallhardwareports"])
            .map(|stdout| parse_hardware_ports(&stdout))
            .unwrap_or_default()
    }
}

impl<R: CommandRunner, C: Clock> PlatformProbe for DarwinProbe<R, C> {
    fn carrier_detected(&self, name: &str) -> bool {
        if !is_safe_interface_name(name) {
            return false;
        }

        capture_stdout(&self.runner, "ifconfig", &[name]).is_some_and(|stdout| {
            stdout
                .lines()
                .any(|line| line.trim() == "status: active")
        })
    }

    fn is_wireless_candidate(&self, name: &str) -> bool {
        if name.starts_with("awdl") || name.starts_with("llw") {
            return true;
        }
        if name.starts_with("lo") {
            return false;
        }

        self.hardware_port(name)
            .is_some_and(|port| port.starts_with("Wi-Fi"))
    }

    fn is_relevant_candidate(&self, name: &str) -> bool {
        if ["bridge", "p2p", "lo"]
            .iter()
            .any(|prefix| name.starts_with(prefix))
        {
            return false;
        }
        if name.starts_with("llw") || name.starts_with("awdl") {
            return true;
        }

        !self
            .hardware_port(name)
            .is_some_and(|port| port.starts_with("Thunderbolt"))
    }

    fn connected_access_point_name(&self, name: &str) -> Option<String> {
        if !is_safe_interface_name(name) {
            return None;
        }

        let stdout = capture_stdout(&self.runner, "networksetup", &["-getairportnetwork", name])?;
        stdout
            .lines()
            .find_map(|line| line.trim().strip_prefix(AIRPORT_PREFIX))
            .map(str::trim)
            .filter(|ssid| !ssid.is_empty())
            .map(ToString::to_string)
    }
}
