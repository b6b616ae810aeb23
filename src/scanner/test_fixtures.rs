//! Shared test fixtures for scanner tests.

use crate::network::{
    AddressRecord, EnumerationError, InterfaceAddresses, InterfaceEnumerator, MacAddress,
};
use crate::probe::PlatformProbe;
use crate::scanner::{ObserverError, ScanObserver, ScanResult};
use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Builds an IPv4 record from dotted-quad text and a prefix length.
pub fn v4(address: &str, prefix_len: u8) -> AddressRecord {
    AddressRecord::from_prefix(address.parse().unwrap(), prefix_len)
}

const MAC: MacAddress = MacAddress::new([0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);

/// Mock enumerator returning interfaces in insertion order.
///
/// An entry without addresses is listed but fails lookup with
/// `InterfaceNotFound`.
#[derive(Default)]
pub struct MockEnumerator {
    entries: Mutex<Vec<(String, Option<InterfaceAddresses>)>>,
    failure: Mutex<Option<String>>,
    delay: Option<Duration>,
    list_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerator whose listing always fails with `message`.
    pub fn failing(message: &str) -> Self {
        let enumerator = Self::new();
        enumerator.set_failure(Some(message));
        enumerator
    }

    fn push(self, name: &str, addresses: Option<InterfaceAddresses>) -> Self {
        self.entries
            .lock()
            .unwrap()
            .push((name.to_string(), addresses));
        self
    }

    /// Interface with IPv4 records and a hardware address.
    pub fn with_ipv4(self, name: &str, records: &[AddressRecord]) -> Self {
        self.push(
            name,
            Some(InterfaceAddresses {
                ipv4: records.to_vec(),
                ipv6: Vec::new(),
                link_layer: Some(MAC),
            }),
        )
    }

    /// Interface with nothing but a hardware address.
    pub fn with_link_only(self, name: &str) -> Self {
        self.push(
            name,
            Some(InterfaceAddresses {
                link_layer: Some(MAC),
                ..InterfaceAddresses::default()
            }),
        )
    }

    /// Interface with a hardware address and an IPv6 link-local address.
    pub fn with_ipv6_link_local(self, name: &str) -> Self {
        self.push(
            name,
            Some(InterfaceAddresses {
                ipv6: vec![Ipv6Addr::new(0xfe80, 0, 0, 0, 0x21a, 0x2bff, 0xfe3c, 0x4d5e)],
                link_layer: Some(MAC),
                ..InterfaceAddresses::default()
            }),
        )
    }

    /// Interface without any address at all.
    pub fn with_nothing(self, name: &str) -> Self {
        self.push(name, Some(InterfaceAddresses::default()))
    }

    /// Interface that is listed but vanishes before the address lookup.
    pub fn with_listed_but_missing(self, name: &str) -> Self {
        self.push(name, None)
    }

    /// Makes every listing sleep, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes listings fail (`Some`) or succeed again (`None`).
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(ToString::to_string);
    }

    /// Replaces the IPv4 records of an existing interface.
    pub fn set_ipv4(&self, name: &str, address: Ipv4Addr, prefix_len: u8) {
        let mut entries = self.entries.lock().unwrap();
        for (entry_name, addresses) in entries.iter_mut() {
            if entry_name == name {
                if let Some(addresses) = addresses {
                    addresses.ipv4 = vec![AddressRecord::from_prefix(address, prefix_len)];
                }
            }
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Highest number of listings that were ever running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl InterfaceEnumerator for MockEnumerator {
    fn list_interfaces(&self) -> Result<Vec<String>, EnumerationError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let result = match self.failure.lock().unwrap().clone() {
            Some(message) => Err(EnumerationError::Platform { message }),
            None => Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .map(|(name, _)| name.clone())
                .collect()),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn addresses(&self, name: &str) -> Result<InterfaceAddresses, EnumerationError> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .and_then(|(_, addresses)| addresses.clone())
            .ok_or_else(|| EnumerationError::InterfaceNotFound {
                name: name.to_string(),
            })
    }
}

/// Mock probe with per-name answers; everything is relevant by default.
#[derive(Default)]
pub struct MockProbe {
    wireless: HashSet<String>,
    carrier: HashSet<String>,
    not_relevant: HashSet<String>,
    access_points: HashMap<String, String>,
    carrier_calls: Mutex<Vec<String>>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wireless(mut self, name: &str) -> Self {
        self.wireless.insert(name.to_string());
        self
    }

    pub fn carrier(mut self, name: &str) -> Self {
        self.carrier.insert(name.to_string());
        self
    }

    pub fn not_relevant(mut self, name: &str) -> Self {
        self.not_relevant.insert(name.to_string());
        self
    }

    pub fn access_point(mut self, name: &str, ssid: &str) -> Self {
        self.access_points
            .insert(name.to_string(), ssid.to_string());
        self
    }

    /// Names passed to `carrier_detected`, in call order.
    pub fn carrier_calls(&self) -> Vec<String> {
        self.carrier_calls.lock().unwrap().clone()
    }
}

impl PlatformProbe for MockProbe {
    fn carrier_detected(&self, name: &str) -> bool {
        self.carrier_calls.lock().unwrap().push(name.to_string());
        self.carrier.contains(name)
    }

    fn is_wireless_candidate(&self, name: &str) -> bool {
        self.wireless.contains(name)
    }

    fn is_relevant_candidate(&self, name: &str) -> bool {
        !self.not_relevant.contains(name)
    }

    fn connected_access_point_name(&self, name: &str) -> Option<String> {
        self.access_points.get(name).cloned()
    }
}

/// Shared log of `(observer name, result)` pairs, in notification order.
pub type CallLog = Arc<Mutex<Vec<(String, ScanResult)>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Names of the observers in `log`, in notification order.
pub fn notified(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
}

/// Observer appending every result it receives to a shared log.
#[derive(Clone)]
pub struct Recorder {
    name: String,
    log: CallLog,
    failure: Option<String>,
}

impl Recorder {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::clone(log),
            failure: None,
        }
    }

    /// Records the result, then fails with `message`.
    pub fn failing(name: &str, log: &CallLog, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(name, log)
        }
    }
}

impl ScanObserver for Recorder {
    fn notify(&self, result: &ScanResult) -> Result<(), ObserverError> {
        self.log
            .lock()
            .unwrap()
            .push((self.name.clone(), result.clone()));
        self.failure
            .as_ref()
            .map_or(Ok(()), |message| Err(ObserverError::new(message.clone())))
    }
}
