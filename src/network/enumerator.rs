//! Interface enumeration trait and error types.

use super::InterfaceAddresses;
use std::sync::Arc;
use thiserror::Error;

/// Error type for interface enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// The scanner treats any of these as a failed scan pass.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// The interface disappeared between listing and address lookup.
    #[error("Interface not found: {name}")]
    InterfaceNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Source of the system's network interfaces and their addresses.
///
/// # Design
///
/// - The scanner depends only on this trait, so tests inject mocks
/// - [`NetdevEnumerator`](super::platform::NetdevEnumerator) is the
///   production implementation
///
/// # Implementation Notes
///
/// - `list_interfaces` must return names in a stable order for a given
///   system state; scan results follow that order
/// - Both calls are synchronous and may block; the scanner runs them on a
///   blocking worker
pub trait InterfaceEnumerator: Send + Sync {
    /// Lists the names of all interfaces, loopback and virtual ones included.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the platform query fails.
    fn list_interfaces(&self) -> Result<Vec<String>, EnumerationError>;

    /// Returns the addresses of one interface, grouped by family.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::InterfaceNotFound`] for unknown names and
    /// [`EnumerationError::Platform`] if the platform query fails.
    fn addresses(&self, name: &str) -> Result<InterfaceAddresses, EnumerationError>;
}

impl<T: InterfaceEnumerator + ?Sized> InterfaceEnumerator for Box<T> {
    fn list_interfaces(&self) -> Result<Vec<String>, EnumerationError> {
        (**self).list_interfaces()
    }

    fn addresses(&self, name: &str) -> Result<InterfaceAddresses, EnumerationError> {
        (**self).addresses(name)
    }
}

impl<T: InterfaceEnumerator + ?Sized> InterfaceEnumerator for Arc<T> {
    fn list_interfaces(&self) -> Result<Vec<String>, EnumerationError> {
        (**self).list_interfaces()
    }

    fn addresses(&self, name: &str) -> Result<InterfaceAddresses, EnumerationError> {
        (**self).addresses(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::AddressRecord;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    struct FixedEnumerator {
        entries: Vec<(String, InterfaceAddresses)>,
    }

    impl InterfaceEnumerator for FixedEnumerator {
        fn list_interfaces(&self) -> Result<Vec<String>, EnumerationError> {
            Ok(self.entries.iter().map(|(name, _)| name.clone()).collect())
        }

        fn addresses(&self, name: &str) -> Result<InterfaceAddresses, EnumerationError> {
            let lookup: HashMap<_, _> = self.entries.iter().cloned().collect();
            lookup
                .get(name)
                .cloned()
                .ok_or_else(|| EnumerationError::InterfaceNotFound {
                    name: name.to_string(),
                })
        }
    }

    fn fixture() -> FixedEnumerator {
        FixedEnumerator {
            entries: vec![(
                "eth0".to_string(),
                InterfaceAddresses {
                    ipv4: vec![AddressRecord::new(Ipv4Addr::new(10, 0, 0, 2))],
                    ..InterfaceAddresses::default()
                },
            )],
        }
    }

    #[test]
    fn boxed_enumerator_delegates() {
        let boxed: Box<dyn InterfaceEnumerator> = Box::new(fixture());

        assert_eq!(boxed.list_interfaces().unwrap(), vec!["eth0"]);
        assert_eq!(boxed.addresses("eth0").unwrap().ipv4.len(), 1);
    }

    #[test]
    fn unknown_interface_is_reported_by_name() {
        let err = fixture().addresses("wlan9").unwrap_err();
        assert!(matches!(err, EnumerationError::InterfaceNotFound { ref name } if name == "wlan9"));
        assert_eq!(err.to_string(), "Interface not found: wlan9");
    }

    #[test]
    fn platform_error_displays_message() {
        let err = EnumerationError::Platform {
            message: "netlink socket closed".to_string(),
        };
        assert!(err.to_string().contains("netlink socket closed"));
    }
}
