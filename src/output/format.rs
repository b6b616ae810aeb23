//! Text and JSON renderings of a scan result.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

use crate::scanner::{ScanResult, ScanResultItem};

use super::OutputError;

/// How results are printed to standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per interface.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Renders `result` in the given format.
///
/// # Errors
///
/// Returns an error only when JSON serialization fails.
pub fn render(result: &ScanResult, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}

/// Renders one line per interface:
///
/// ```text
/// eth0: wired, connected, 192.168.1.5 / 255.255.255.0
/// wlan0: wireless, connected to "HomeNet", 10.0.0.7 / 255.255.255.0
/// ```
#[must_use]
pub fn render_text(result: &ScanResult) -> String {
    if result.is_empty() {
        return "No relevant interfaces found\n".to_string();
    }

    let mut out = String::new();
    for item in result {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", text_line(item));
    }
    out
}

fn text_line(item: &ScanResultItem) -> String {
    let state = match (item.connected(), item.access_point_name()) {
        (true, Some(ap)) => format!("connected to \"{ap}\""),
        (true, None) => "connected".to_string(),
        (false, _) => "disconnected".to_string(),
    };

    let mut line = format!("{}: {}, {state}", item.interface(), item.kind());
    let networks = item.networks_and_netmasks();
    if networks.is_empty() {
        line.push_str(", no IPv4 address");
    } else {
        line.push_str(", ");
        line.push_str(&networks.join(", "));
    }
    line
}

/// Renders the result as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(result: &ScanResult) -> Result<String, OutputError> {
    serde_json::to_string_pretty(result).map_err(OutputError::Serialize)
}
