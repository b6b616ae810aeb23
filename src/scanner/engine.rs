//! Synchronous scan pass.

use super::item::{ScanResult, ScanResultItem};
use super::relevance::{RelevantInterface, find_relevant_interfaces};
use super::ScanError;
use crate::network::InterfaceEnumerator;
use crate::network::filter::InterfaceFilter;
use crate::probe::PlatformProbe;

/// Performs one full scan: relevance selection, classification and
/// connection detection.
///
/// [`scan`](Self::scan) blocks on OS queries and external commands; the
/// [`NetworkScanner`](super::NetworkScanner) runs it on a blocking worker.
pub struct ScanEngine<E, P> {
    enumerator: E,
    probe: P,
    filter: Option<Box<dyn InterfaceFilter>>,
}

impl<E, P> ScanEngine<E, P>
where
    E: InterfaceEnumerator,
    P: PlatformProbe,
{
    /// Creates an engine reporting every relevant interface.
    #[must_use]
    pub const fn new(enumerator: E, probe: P) -> Self {
        Self {
            enumerator,
            probe,
            filter: None,
        }
    }

    /// Restricts reports to interfaces whose name passes `filter`.
    ///
    /// The filter runs before any probe is invoked for the interface.
    #[must_use]
    pub fn with_filter<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Returns the enumerator.
    pub const fn enumerator(&self) -> &E {
        &self.enumerator
    }

    /// Returns the probe.
    pub const fn probe(&self) -> &P {
        &self.probe
    }

    /// Runs one scan pass.
    ///
    /// Items follow the enumerator's order; nothing is sorted or
    /// deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Enumeration`] if listing interfaces or looking
    /// up addresses fails. Probe failures are never errors.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let relevant = find_relevant_interfaces(&self.enumerator, &self.probe)?;

        let result: ScanResult = relevant
            .into_iter()
            .filter(|iface| self.accepts(&iface.name))
            .map(|iface| self.classify(iface))
            .collect();

        tracing::debug!("Scan found {} relevant interface(s)", result.len());
        Ok(result)
    }

    fn accepts(&self, name: &str) -> bool {
        let accepted = self.filter.as_ref().is_none_or(|f| f.matches(name));
        if !accepted {
            tracing::trace!("Interface {name} rejected by filter");
        }
        accepted
    }

    fn classify(&self, iface: RelevantInterface) -> ScanResultItem {
        let RelevantInterface { name, addresses } = iface;

        if self.probe.is_wireless_candidate(&name) {
            let access_point = self.probe.connected_access_point_name(&name);
            ScanResultItem::wireless(name, access_point, addresses)
        } else {
            let carrier = self.probe.carrier_detected(&name);
            ScanResultItem::wired(name, carrier, addresses)
        }
    }
}

impl<E, P> std::fmt::Debug for ScanEngine<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanEngine")
            .field("has_filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::filter::{FilterChain, NameRegexFilter};
    use crate::scanner::InterfaceKind;
    use crate::scanner::test_fixtures::{MockEnumerator, MockProbe, v4};

    fn home_network() -> (MockEnumerator, MockProbe) {
        let enumerator = MockEnumerator::new()
            .with_ipv4("lo", &[v4("127.0.0.1", 8)])
            .with_ipv4("eth0", &[v4("192.168.1.5", 24)])
            .with_link_only("wlan0");
        let probe = MockProbe::new()
            .wireless("wlan0")
            .carrier("eth0")
            .access_point("wlan0", "HomeNet");
        (enumerator, probe)
    }

    #[test]
    fn classifies_wired_and_wireless_interfaces() {
        let (enumerator, probe) = home_network();
        let engine = ScanEngine::new(enumerator, probe);

        let result = engine.scan().unwrap();

        assert_eq!(result.len(), 2);

        let eth0 = &result[0];
        assert_eq!(eth0.interface(), "eth0");
        assert_eq!(eth0.kind(), InterfaceKind::Wired);
        assert!(eth0.connected());
        assert_eq!(eth0.access_point_name(), None);
        assert_eq!(eth0.addresses(), [v4("192.168.1.5", 24)]);
        assert_eq!(
            eth0.networks_and_netmasks(),
            vec!["192.168.1.5 / 255.255.255.0"]
        );

        let wlan0 = &result[1];
        assert_eq!(wlan0.interface(), "wlan0");
        assert_eq!(wlan0.kind(), InterfaceKind::Wireless);
        assert!(wlan0.connected());
        assert_eq!(wlan0.access_point_name(), Some("HomeNet"));
    }

    #[test]
    fn disconnected_ethernet_is_reported_without_addresses() {
        let enumerator = MockEnumerator::new().with_link_only("eth0");
        let engine = ScanEngine::new(enumerator, MockProbe::new());

        let result = engine.scan().unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind(), InterfaceKind::Wired);
        assert!(!result[0].connected());
        assert!(result[0].addresses().is_empty());
    }

    #[test]
    fn unassociated_wireless_is_disconnected() {
        let enumerator = MockEnumerator::new().with_ipv4("wlan0", &[v4("10.0.0.9", 24)]);
        let probe = MockProbe::new().wireless("wlan0");
        let engine = ScanEngine::new(enumerator, probe);

        let result = engine.scan().unwrap();

        assert!(!result[0].connected());
        assert_eq!(result[0].access_point_name(), None);
    }

    #[test]
    fn wired_items_never_carry_access_point_even_if_probe_answers() {
        let enumerator = MockEnumerator::new().with_ipv4("eth0", &[v4("192.168.1.5", 24)]);
        let probe = MockProbe::new().access_point("eth0", "Confused");
        let engine = ScanEngine::new(enumerator, probe);

        let result = engine.scan().unwrap();

        assert_eq!(result[0].kind(), InterfaceKind::Wired);
        assert_eq!(result[0].access_point_name(), None);
    }

    #[test]
    fn wireless_interfaces_are_not_carrier_probed() {
        let (enumerator, probe) = home_network();
        let engine = ScanEngine::new(enumerator, probe);

        engine.scan().unwrap();

        assert_eq!(engine.probe().carrier_calls(), vec!["eth0"]);
    }

    #[test]
    fn repeated_scans_are_deterministic() {
        let (enumerator, probe) = home_network();
        let engine = ScanEngine::new(enumerator, probe);

        let first = engine.scan().unwrap();
        let second = engine.scan().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn filter_excludes_before_probing() {
        let (enumerator, probe) = home_network();
        let filter = FilterChain::new().exclude(NameRegexFilter::new("^eth").unwrap());
        let engine = ScanEngine::new(enumerator, probe).with_filter(filter);

        let result = engine.scan().unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].interface(), "wlan0");
        assert!(engine.probe().carrier_calls().is_empty());
    }

    #[test]
    fn enumeration_failure_fails_the_scan() {
        let engine = ScanEngine::new(MockEnumerator::failing("boom"), MockProbe::new());

        let error = engine.scan().unwrap_err();

        assert!(matches!(error, ScanError::Enumeration(_)));
    }
}
