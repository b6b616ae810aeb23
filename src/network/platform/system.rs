//! Interface enumeration backed by the `netdev` crate.

use parking_lot::Mutex;

use crate::network::{
    AddressRecord, EnumerationError, InterfaceAddresses, InterfaceEnumerator, MacAddress,
};

/// Cross-platform [`InterfaceEnumerator`] using `netdev::get_interfaces`.
///
/// `list_interfaces` takes one system snapshot and keeps it, so the address
/// lookups of the same scan pass see a consistent view even if interfaces
/// come and go in the meantime.
///
/// # Example
///
/// ```no_run
/// use ifscan::network::{InterfaceEnumerator, platform::NetdevEnumerator};
///
/// let enumerator = NetdevEnumerator::new();
/// for name in enumerator.list_interfaces().expect("enumeration failed") {
///     let addresses = enumerator.addresses(&name).expect("lookup failed");
///     println!("{name}: {:?}", addresses.ipv4);
/// }
/// ```
#[derive(Debug, Default)]
pub struct NetdevEnumerator {
    snapshot: Mutex<Vec<(String, InterfaceAddresses)>>,
}

impl NetdevEnumerator {
    /// Creates an enumerator with an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(&self) -> Vec<String> {
        let entries: Vec<_> = netdev::get_interfaces()
            .into_iter()
            .map(|iface| (interface_name(&iface), collect_addresses(&iface)))
            .collect();
        let names = entries.iter().map(|(name, _)| name.clone()).collect();

        *self.snapshot.lock() = entries;
        names
    }

    fn lookup(&self, name: &str) -> Option<InterfaceAddresses> {
        self.snapshot
            .lock()
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, addresses)| addresses.clone())
    }
}

impl InterfaceEnumerator for NetdevEnumerator {
    fn list_interfaces(&self) -> Result<Vec<String>, EnumerationError> {
        Ok(self.refresh())
    }

    fn addresses(&self, name: &str) -> Result<InterfaceAddresses, EnumerationError> {
        if let Some(addresses) = self.lookup(name) {
            return Ok(addresses);
        }

        // Not in the current snapshot; the interface may be new.
        self.refresh();
        self.lookup(name)
            .ok_or_else(|| EnumerationError::InterfaceNotFound {
                name: name.to_string(),
            })
    }
}

/// Windows reports adapter GUIDs as names; the friendly name is what the
/// platform tools (and users) refer to.
#[cfg(windows)]
fn interface_name(iface: &netdev::Interface) -> String {
    iface
        .friendly_name
        .clone()
        .unwrap_or_else(|| iface.name.clone())
}

#[cfg(not(windows))]
fn interface_name(iface: &netdev::Interface) -> String {
    iface.name.clone()
}

fn collect_addresses(iface: &netdev::Interface) -> InterfaceAddresses {
    let ipv4 = iface
        .ipv4
        .iter()
        .map(|net| AddressRecord::from_prefix(net.addr(), net.prefix_len()))
        .collect();

    let ipv6 = iface.ipv6.iter().map(|net| net.addr()).collect();

    // An all-zero hardware address is a placeholder, not a link-layer identity.
    let link_layer = iface
        .mac_addr
        .map(|mac| MacAddress::new(mac.octets()))
        .filter(|mac| !mac.is_zero());

    InterfaceAddresses {
        ipv4,
        ipv6,
        link_layer,
    }
}
