//! Selection of the interfaces worth reporting.

use crate::network::{AddressRecord, EnumerationError, InterfaceEnumerator};
use crate::probe::PlatformProbe;

/// An interface that passed the relevance rules, with its IPv4 records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevantInterface {
    /// Interface name.
    pub name: String,
    /// IPv4 records; empty for a present but unconfigured interface.
    pub addresses: Vec<AddressRecord>,
}

/// Returns the relevant interfaces in enumeration order.
///
/// - An interface with IPv4 addresses is relevant unless one of them is a
///   loopback address.
/// - An interface without IPv4 is relevant only if a hardware address is
///   all it has and the probe considers it a candidate. This keeps a
///   disconnected Ethernet port and drops IPv6-only interfaces.
///
/// # Errors
///
/// Returns the first [`EnumerationError`] from the enumerator.
pub fn find_relevant_interfaces<E, P>(
    enumerator: &E,
    probe: &P,
) -> Result<Vec<RelevantInterface>, EnumerationError>
where
    E: InterfaceEnumerator + ?Sized,
    P: PlatformProbe + ?Sized,
{
    let mut relevant = Vec::new();

    for name in enumerator.list_interfaces()? {
        let addresses = enumerator.addresses(&name)?;

        if !addresses.ipv4.is_empty() {
            if addresses.ipv4.iter().any(AddressRecord::is_loopback) {
                tracing::trace!("Skipping loopback interface {name}");
                continue;
            }
            relevant.push(RelevantInterface {
                name,
                addresses: addresses.ipv4,
            });
        } else if addresses.is_link_layer_only() && probe.is_relevant_candidate(&name) {
            relevant.push(RelevantInterface {
                name,
                addresses: Vec::new(),
            });
        } else {
            tracing::trace!("Skipping interface {name}: families {:?}", addresses.families());
        }
    }

    Ok(relevant)
}
