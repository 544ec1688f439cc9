use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::probe::ProbeOutcome;

/// Where a ranked set came from. The two kinds are stored under different keys
/// and never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    #[serde(rename = "backend_auto")]
    BackendAuto,
    #[serde(rename = "browser_upload")]
    ClientUpload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(rename = "ip", alias = "address")]
    pub addr: Ipv4Addr,
    #[serde(rename = "latency", alias = "latencyMs")]
    pub latency_ms: u64,
    #[serde(rename = "colo", alias = "locationCode", default)]
    pub location: Option<String>,
}

impl RankedEntry {
    /// Successful outcomes only; failures have no latency to rank by.
    pub fn from_outcome(outcome: &ProbeOutcome) -> Option<Self> {
        let success = outcome.result.as_ref().ok()?;
        Some(Self {
            addr: outcome.addr,
            latency_ms: success.latency_ms,
            location: success.location.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSet {
    #[serde(rename = "fastIPs")]
    pub entries: Vec<RankedEntry>,
    #[serde(rename = "lastTested")]
    pub last_tested: DateTime<Utc>,
    pub count: usize,
    #[serde(rename = "source")]
    pub provenance: Provenance,
}

impl RankedSet {
    pub fn new(entries: Vec<RankedEntry>, provenance: Provenance) -> Self {
        Self {
            count: entries.len(),
            entries,
            last_tested: Utc::now(),
            provenance,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
