use std::net::Ipv4Addr;

use crate::error::ProbeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSuccess {
    pub latency_ms: u64,
    /// Edge location that answered, when the trace header was present.
    pub location: Option<String>,
}

/// Result of one timed probe against one candidate address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub addr: Ipv4Addr,
    pub result: Result<ProbeSuccess, ProbeError>,
}

impl ProbeOutcome {
    pub fn success(addr: Ipv4Addr, latency_ms: u64, location: Option<String>) -> Self {
        Self {
            addr,
            result: Ok(ProbeSuccess {
                latency_ms,
                location,
            }),
        }
    }

    pub fn failure(addr: Ipv4Addr, error: ProbeError) -> Self {
        Self {
            addr,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn latency_ms(&self) -> Option<u64> {
        self.result.as_ref().ok().map(|s| s.latency_ms)
    }

    pub fn location(&self) -> Option<&str> {
        self.result.as_ref().ok().and_then(|s| s.location.as_deref())
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.result.as_ref().err()
    }
}
