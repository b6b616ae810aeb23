//! Platform probes: carrier detection, wired/wireless classification and
//! access point lookup.
//!
//! This module provides:
//! - The capability trait every platform implements ([`PlatformProbe`])
//! - Runtime platform detection ([`Platform`], [`detect`])
//! - One implementation per supported OS ([`LinuxProbe`], [`DarwinProbe`],
//!   [`WindowsProbe`]) plus a [`FallbackProbe`]
//! - External command plumbing ([`CommandRunner`], [`SystemCommandRunner`])
//!
//! # Failure Semantics
//!
//! Probes never fail. Unreadable files, missing utilities, non-zero exit
//! codes, timeouts and unparsable output all degrade to the conservative
//! answer (`false` / `None`) and are logged at debug level.

mod command;
mod darwin;
mod fallback;
pub mod hardware_ports;
mod linux;
mod windows;

#[cfg(test)]
pub(crate) mod test_fixtures;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use command::{CommandError, CommandOutput, CommandRunner, SystemCommandRunner};
pub use darwin::DarwinProbe;
pub use fallback::FallbackProbe;
pub use linux::LinuxProbe;
pub use windows::WindowsProbe;

/// Per-platform answers about a single interface.
///
/// Implementations may block (file reads, process spawns); callers run them
/// off the async executor.
pub trait PlatformProbe: Send + Sync {
    /// Returns true iff a physical link is currently detected.
    fn carrier_detected(&self, name: &str) -> bool;

    /// Returns true if the interface is likely wireless.
    fn is_wireless_candidate(&self, name: &str) -> bool;

    /// Returns true unless the interface is structurally uninteresting
    /// (loopback, bridge, peer-to-peer overlay, tunnel, ...).
    ///
    /// Used to decide whether an interface without any IPv4 address is
    /// still worth reporting as present but disconnected.
    fn is_relevant_candidate(&self, name: &str) -> bool;

    /// Returns the name of the wireless network the interface is associated
    /// with, or `None` when not associated or unknown.
    fn connected_access_point_name(&self, name: &str) -> Option<String>;
}

impl<T: PlatformProbe + ?Sized> PlatformProbe for Box<T> {
    fn carrier_detected(&self, name: &str) -> bool {
        (**self).carrier_detected(name)
    }

    fn is_wireless_candidate(&self, name: &str) -> bool {
        (**self).is_wireless_candidate(name)
    }

    fn is_relevant_candidate(&self, name: &str) -> bool {
        (**self).is_relevant_candidate(name)
    }

    fn connected_access_point_name(&self, name: &str) -> Option<String> {
        (**self).connected_access_point_name(name)
    }
}

impl<T: PlatformProbe + ?Sized> PlatformProbe for Arc<T> {
    fn carrier_detected(&self, name: &str) -> bool {
        (**self).carrier_detected(name)
    }

    fn is_wireless_candidate(&self, name: &str) -> bool {
        (**self).is_wireless_candidate(name)
    }

    fn is_relevant_candidate(&self, name: &str) -> bool {
        (**self).is_relevant_candidate(name)
    }

    fn connected_access_point_name(&self, name: &str) -> Option<String> {
        (**self).connected_access_point_name(name)
    }
}

/// Operating systems with a dedicated probe implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux (sysfs + wireless tools).
    Linux,
    /// macOS (`networksetup` / `ifconfig`).
    MacOs,
    /// Windows (`netsh`).
    Windows,
    /// Anything else; served by [`FallbackProbe`].
    Other,
}

impl Platform {
    /// Detects the platform the process is running on.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` value to a platform.
    #[must_use]
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "Linux"),
            Self::MacOs => write!(f, "macOS"),
            Self::Windows => write!(f, "Windows"),
            Self::Other => write!(f, "unsupported platform"),
        }
    }
}

/// Builds the probe for `platform`, with external commands killed after
/// `command_timeout`.
#[must_use]
pub fn for_platform(platform: Platform, command_timeout: Duration) -> Box<dyn PlatformProbe> {
    let runner = SystemCommandRunner::new(command_timeout);
    match platform {
        Platform::Linux => Box::new(LinuxProbe::new(runner)),
        Platform::MacOs => Box::new(DarwinProbe::new(runner)),
        Platform::Windows => Box::new(WindowsProbe::new(runner)),
        Platform::Other => Box::new(FallbackProbe),
    }
}

/// Selects the probe for the running platform.
///
/// Intended to be called once at startup; the returned probe is then shared
/// by every scan.
#[must_use]
pub fn detect(command_timeout: Duration) -> Box<dyn PlatformProbe> {
    let platform = Platform::current();
    tracing::debug!("Using {platform} interface probes");
    for_platform(platform, command_timeout)
}

/// Returns false for names that must never reach a file path or a command
/// line: empty names, path separators, parent references and names that
/// would parse as options.
pub(crate) fn is_safe_interface_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains('\0')
        && !name.starts_with('-')
}
