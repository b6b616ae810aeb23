//! Linux probes backed by sysfs and the wireless tools.

use std::path::{Path, PathBuf};

use super::command::{CommandRunner, capture_stdout};
use super::{PlatformProbe, is_safe_interface_name};

/// Default mount point of sysfs.
const SYSFS_ROOT: &str = "/sys";

/// Linux implementation of [`PlatformProbe`].
///
/// - Carrier state comes from `/sys/class/net/<name>/carrier`.
/// - Wired/wireless classification follows the kernel and systemd naming
///   conventions (`eth*`, `en*` wired; `wl*` Wi-Fi; `ww*` WWAN).
/// - The associated SSID comes from `iwgetid <name> -r`.
#[derive(Debug, Clone)]
pub struct LinuxProbe<R> {
    sysfs_root: PathBuf,
    runner: R,
}

impl<R: CommandRunner> LinuxProbe<R> {
    /// Creates a probe reading the real sysfs.
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self {
            sysfs_root: PathBuf::from(SYSFS_ROOT),
            runner,
        }
    }

    /// Reads sysfs from a different root (tests, containers).
    #[must_use]
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    /// Returns the sysfs root in use.
    #[must_use]
    pub fn sysfs_root(&self) -> &Path {
        &self.sysfs_root
    }

    fn carrier_path(&self, name: &str) -> PathBuf {
        self.sysfs_root
            .join("class")
            .join("net")
            .join(name)
            .join("carrier")
    }
}

impl<R: CommandRunner> PlatformProbe for LinuxProbe<R> {
    fn carrier_detected(&self, name: &str) -> bool {
        if !is_safe_interface_name(name) {
            return false;
        }

        let path = self.carrier_path(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => parse_carrier(&content),
            Err(e) => {
                // Reading `carrier` fails with EINVAL while the interface is down.
                tracing::debug!("Cannot read {}: {e}", path.display());
                false
            }
        }
    }

    fn is_wireless_candidate(&self, name: &str) -> bool {
        name.len() > 2 && (name.starts_with("wl") || name.starts_with("ww"))
    }

    fn is_relevant_candidate(&self, name: &str) -> bool {
        name.len() > 2
            && ["en", "wl", "ww", "eth"]
                .iter()
                .any(|prefix| name.starts_with(prefix))
    }

    fn connected_access_point_name(&self, name: &str) -> Option<String> {
        if !is_safe_interface_name(name) {
            return None;
        }

        let stdout = capture_stdout(&self.runner, "iwgetid", &[name, "-r"])?;
        let ssid = stdout.trim();
        (!ssid.is_empty()).then(|| ssid.to_string())
    }
}

/// Any positive integer means the link is up.
fn parse_carrier(content: &str) -> bool {
    content.trim().parse::<i64>().is_ok_and(|value| value > 0)
}
