use super::PlatformProbe;

/// Probe for platforms without a dedicated implementation.
///
/// Reports every interface as a disconnected wired candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProbe;

impl PlatformProbe for FallbackProbe {
    fn carrier_detected(&self, _name: &str) -> bool {
        false
    }

    fn is_wireless_candidate(&self, _name: &str) -> bool {
        false
    }

    fn is_relevant_candidate(&self, _name: &str) -> bool {
        true
    }

    fn connected_access_point_name(&self, _name: &str) -> Option<String> {
        None
    }
}
