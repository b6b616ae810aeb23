//! Per-interface address records.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use super::MacAddress;

/// Address families an interface can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4 addresses.
    Ipv4,
    /// IPv6 addresses.
    Ipv6,
    /// Hardware (link-layer) address.
    Link,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
            Self::Link => write!(f, "link-layer"),
        }
    }
}

/// One IPv4 address of an interface with its netmask and broadcast address,
/// when the platform reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// The IPv4 address itself.
    pub address: Ipv4Addr,
    /// The netmask of the network the address belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<Ipv4Addr>,
    /// The broadcast address of that network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<Ipv4Addr>,
}

impl AddressRecord {
    /// Creates a record with only the address known.
    #[must_use]
    pub const fn new(address: Ipv4Addr) -> Self {
        Self {
            address,
            netmask: None,
            broadcast: None,
        }
    }

    /// Creates a record from an address and CIDR prefix length, deriving the
    /// netmask and the broadcast address.
    ///
    /// Point-to-point (`/31`) and host (`/32`) networks have no broadcast
    /// address.
    ///
    /// ```
    /// use ifscan::network::AddressRecord;
    /// use std::net::Ipv4Addr;
    ///
    /// let record = AddressRecord::from_prefix(Ipv4Addr::new(192, 168, 1, 5), 24);
    /// assert_eq!(record.netmask, Some(Ipv4Addr::new(255, 255, 255, 0)));
    /// assert_eq!(record.broadcast, Some(Ipv4Addr::new(192, 168, 1, 255)));
    /// ```
    #[must_use]
    pub fn from_prefix(address: Ipv4Addr, prefix_len: u8) -> Self {
        let mask = prefix_to_mask(prefix_len);
        let broadcast = (prefix_len < 31).then(|| Ipv4Addr::from(u32::from(address) | !mask));

        Self {
            address,
            netmask: Some(Ipv4Addr::from(mask)),
            broadcast,
        }
    }

    /// Sets the netmask.
    #[must_use]
    pub const fn with_netmask(mut self, netmask: Ipv4Addr) -> Self {
        self.netmask = Some(netmask);
        self
    }

    /// Sets the broadcast address.
    #[must_use]
    pub const fn with_broadcast(mut self, broadcast: Ipv4Addr) -> Self {
        self.broadcast = Some(broadcast);
        self
    }

    /// Returns true if the address is in `127.0.0.0/8`.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        self.address.is_loopback()
    }
}

const fn prefix_to_mask(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => !((1u32 << (32 - p)) - 1),
    }
}

/// Everything the enumerator knows about one interface's addresses, grouped
/// by family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceAddresses {
    /// IPv4 records in enumeration order.
    pub ipv4: Vec<AddressRecord>,
    /// IPv6 addresses in enumeration order.
    pub ipv6: Vec<Ipv6Addr>,
    /// Hardware address, if the interface has one.
    pub link_layer: Option<MacAddress>,
}

impl InterfaceAddresses {
    /// Returns the address families present on the interface.
    #[must_use]
    pub fn families(&self) -> Vec<AddressFamily> {
        let mut families = Vec::with_capacity(3);
        if !self.ipv4.is_empty() {
            families.push(AddressFamily::Ipv4);
        }
        if !self.ipv6.is_empty() {
            families.push(AddressFamily::Ipv6);
        }
        if self.link_layer.is_some() {
            families.push(AddressFamily::Link);
        }
        families
    }

    /// Returns true if the interface carries the given family.
    #[must_use]
    pub fn has_family(&self, family: AddressFamily) -> bool {
        match family {
            AddressFamily::Ipv4 => !self.ipv4.is_empty(),
            AddressFamily::Ipv6 => !self.ipv6.is_empty(),
            AddressFamily::Link => self.link_layer.is_some(),
        }
    }

    /// Returns true if a hardware address is the only thing the interface
    /// has, i.e. it is present but not IP-configured at all.
    #[must_use]
    pub fn is_link_layer_only(&self) -> bool {
        self.families() == [AddressFamily::Link]
    }
}
