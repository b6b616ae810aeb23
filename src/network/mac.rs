//! Link-layer (MAC) address type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a valid MAC address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid MAC address '{input}': {reason}")]
pub struct MacAddressError {
    /// The rejected input, as given.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

/// A six-octet hardware address.
///
/// Parsing is lenient about presentation (surrounding whitespace, letter
/// case, `:` or `-` separators) but strict about content. Display always
/// produces the canonical lowercase, colon-separated form.
///
/// # Examples
///
/// ```
/// use ifscan::network::MacAddress;
///
/// let mac: MacAddress = " 00-1A-2B-3C-4D-5E ".parse().unwrap();
/// assert_eq!(mac.to_string(), "00:1a:2b:3c:4d:5e");
/// assert!(mac.is_unicast());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Creates a MAC address from raw octets.
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the raw octets.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Returns true if every octet is zero.
    ///
    /// Loopback and tunnel devices commonly report this placeholder.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Returns true if this is a unicast address (I/G bit clear).
    #[must_use]
    pub const fn is_unicast(&self) -> bool {
        self.0[0] & 0x01 == 0
    }

    /// Returns true if this is a universally administered, vendor-assigned
    /// unicast address (both I/G and U/L bits clear).
    #[must_use]
    pub const fn is_universal(&self) -> bool {
        self.0[0] & 0x03 == 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| MacAddressError {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty input"));
        }

        let mut octets = [0u8; 6];
        let mut count = 0;
        for part in trimmed.split([':', '-']) {
            if count == octets.len() {
                return Err(invalid("more than six octets"));
            }
            if part.is_empty() || part.len() > 2 {
                return Err(invalid("each octet must be one or two hex digits"));
            }
            // from_str_radix tolerates a leading sign
            if !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid("non-hexadecimal digit"));
            }
            octets[count] =
                u8::from_str_radix(part, 16).map_err(|_| invalid("non-hexadecimal digit"))?;
            count += 1;
        }

        if count != octets.len() {
            return Err(invalid("fewer than six octets"));
        }

        Ok(Self(octets))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = MacAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}
