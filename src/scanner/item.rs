//! Scan result types.

use std::fmt;

use serde::Serialize;

use crate::network::AddressRecord;

/// Whether an interface is a wired or a wireless link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    /// Ethernet and other cabled links; connection state is the carrier.
    Wired,
    /// Wi-Fi and WWAN; connection state is the access point association.
    Wireless,
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wired => write!(f, "wired"),
            Self::Wireless => write!(f, "wireless"),
        }
    }
}

/// Observed state of one interface at scan time.
///
/// Only the two constructors exist, so an access point name can never be
/// attached to a wired item and `connected` always follows the probe that
/// applies to the interface kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResultItem {
    interface: String,
    kind: InterfaceKind,
    connected: bool,
    addresses: Vec<AddressRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_point_name: Option<String>,
}

impl ScanResultItem {
    /// Creates a wired item; `carrier` is the carrier probe's answer.
    #[must_use]
    pub fn wired(interface: impl Into<String>, carrier: bool, addresses: Vec<AddressRecord>) -> Self {
        Self {
            interface: interface.into(),
            kind: InterfaceKind::Wired,
            connected: carrier,
            addresses,
            access_point_name: None,
        }
    }

    /// Creates a wireless item; it is connected iff an access point is known.
    #[must_use]
    pub fn wireless(
        interface: impl Into<String>,
        access_point_name: Option<String>,
        addresses: Vec<AddressRecord>,
    ) -> Self {
        Self {
            interface: interface.into(),
            kind: InterfaceKind::Wireless,
            connected: access_point_name.is_some(),
            addresses,
            access_point_name,
        }
    }

    /// Returns the interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    #[must_use]
    pub const fn kind(&self) -> InterfaceKind {
        self.kind
    }

    #[must_use]
    pub const fn is_wireless(&self) -> bool {
        matches!(self.kind, InterfaceKind::Wireless)
    }

    /// Returns true if a carrier (wired) or an association (wireless) was
    /// detected.
    #[must_use]
    pub const fn connected(&self) -> bool {
        self.connected
    }

    /// Returns the IPv4 address records in enumeration order.
    #[must_use]
    pub fn addresses(&self) -> &[AddressRecord] {
        &self.addresses
    }

    /// Returns the associated wireless network name, if any.
    #[must_use]
    pub fn access_point_name(&self) -> Option<&str> {
        self.access_point_name.as_deref()
    }

    /// Formats every address as `address / netmask`, or just `address` when
    /// the netmask is unknown.
    #[must_use]
    pub fn networks_and_netmasks(&self) -> Vec<String> {
        self.addresses.iter().map(format_network).collect()
    }

    /// Returns the first address and its netmask, if the interface has one.
    #[must_use]
    pub fn first_address_and_netmask(&self) -> Option<String> {
        self.addresses.first().map(format_network)
    }
}

fn format_network(record: &AddressRecord) -> String {
    record.netmask.map_or_else(
        || record.address.to_string(),
        |netmask| format!("{} / {netmask}", record.address),
    )
}

/// The items of one scan pass, in enumeration order.
pub type ScanResult = Vec<ScanResultItem>;
