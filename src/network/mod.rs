//! Network layer: interface enumeration and the address types it reports.
//!
//! This module provides types and traits for:
//! - Hardware addresses ([`MacAddress`])
//! - Per-family address records ([`AddressRecord`], [`InterfaceAddresses`])
//! - Enumerating interfaces ([`InterfaceEnumerator`])
//! - Name-based interface filtering ([`filter`])
//! - Platform-backed enumeration ([`platform`])

mod address;
mod enumerator;
pub mod filter;
mod mac;
pub mod platform;


pub use address::{AddressFamily, AddressRecord, InterfaceAddresses};
pub use enumerator::{EnumerationError, InterfaceEnumerator};
pub use mac::{MacAddress, MacAddressError};
