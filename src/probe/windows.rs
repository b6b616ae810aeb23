//! Windows probes backed by `netsh`.
//!
//! `netsh` localizes its field labels; only English output is understood.
//! On other locales every answer degrades to `false`/`None`.

use super::command::{CommandRunner, capture_stdout};
use super::{PlatformProbe, is_safe_interface_name};

/// Adapter name prefixes that never carry a physical link.
const VIRTUAL_PREFIXES: &[&str] = &["loopback", "vethernet", "isatap", "teredo", "bluetooth"];

/// Windows implementation of [`PlatformProbe`].
#[derive(Debug, Clone)]
pub struct WindowsProbe<R> {
    runner: R,
}

impl<R: CommandRunner> WindowsProbe<R> {
    #[must_use]
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    fn wlan_interfaces(&self) -> Vec<WlanInterface> {
        capture_stdout(&self.runner, "netsh", &["wlan", "show", "interfaces"])
            .map(|stdout| parse_wlan_interfaces(&stdout))
            .unwrap_or_default()
    }
}

impl<R: CommandRunner> PlatformProbe for WindowsProbe<R> {
    fn carrier_detected(&self, name: &str) -> bool {
        if !is_safe_interface_name(name) {
            return false;
        }

        let selector = format!("name={name}");
        capture_stdout(
            &self.runner,
            "netsh",
            &["interface", "show", "interface", &selector],
        )
        .and_then(|stdout| field(&stdout, "Connect state"))
        .is_some_and(|state| state.eq_ignore_ascii_case("Connected"))
    }

    fn is_wireless_candidate(&self, name: &str) -> bool {
        self.wlan_interfaces()
            .iter()
            .any(|iface| iface.name.eq_ignore_ascii_case(name))
    }

    fn is_relevant_candidate(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        !VIRTUAL_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
    }

    fn connected_access_point_name(&self, name: &str) -> Option<String> {
        self.wlan_interfaces()
            .into_iter()
            .find(|iface| iface.name.eq_ignore_ascii_case(name))
            .filter(|iface| {
                iface
                    .state
                    .as_deref()
                    .is_some_and(|state| state.eq_ignore_ascii_case("connected"))
            })
            .and_then(|iface| iface.ssid)
            .filter(|ssid| !ssid.is_empty())
    }
}

/// One block of `netsh wlan show interfaces` output.
#[derive(Debug, Default, PartialEq, Eq)]
struct WlanInterface {
    name: String,
    state: Option<String>,
    ssid: Option<String>,
}

/// Splits a `Key   : value` line at the first colon.
fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Returns the value of the first `key : value` line whose key matches.
fn field(output: &str, key: &str) -> Option<String> {
    output
        .lines()
        .filter_map(key_value)
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.to_string())
}

/// Parses `netsh wlan show interfaces`; each `Name` line starts a new block.
fn parse_wlan_interfaces(output: &str) -> Vec<WlanInterface> {
    let mut interfaces: Vec<WlanInterface> = Vec::new();

    for (key, value) in output.lines().filter_map(key_value) {
        match key {
            "Name" => interfaces.push(WlanInterface {
                name: value.to_string(),
                ..WlanInterface::default()
            }),
            "State" => {
                if let Some(current) = interfaces.last_mut() {
                    current.state = Some(value.to_string());
                }
            }
            "SSID" => {
                if let Some(current) = interfaces.last_mut() {
                    current.ssid = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    interfaces
}
