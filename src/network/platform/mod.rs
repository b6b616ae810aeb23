//! Platform-backed interface enumeration.
//!
//! # Platform Support
//!
//! - **Linux / macOS / Windows**: [`NetdevEnumerator`] via the `netdev` crate
//!   (`getifaddrs` and netlink on Unix, `GetAdaptersAddresses` on Windows).

mod system;

pub use system::NetdevEnumerator;

/// The enumerator used in production on every supported platform.
pub type PlatformEnumerator = NetdevEnumerator;
