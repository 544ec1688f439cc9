use std::fmt::Display;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Error,
}

/// What one source document contributed to an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResult {
    /// The source URL.
    pub name: String,
    pub status: SourceStatus,
    /// Raw address/CIDR tokens matched in the document.
    pub count: usize,
    /// Valid addresses after expansion, before deduplication across sources.
    #[serde(default)]
    pub addresses: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceResult {
    pub fn success(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            status: SourceStatus::Success,
            count,
            addresses: 0,
            error: None,
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Display) -> Self {
        Self {
            name: name.into(),
            status: SourceStatus::Error,
            count: 0,
            addresses: 0,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SourceStatus::Success
    }
}

/// The full candidate pool produced by one aggregation run.
///
/// Addresses are unique and ascending by numeric value. A new snapshot replaces
/// the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub ips: Vec<Ipv4Addr>,
    pub last_updated: DateTime<Utc>,
    pub count: usize,
    pub sources: Vec<SourceResult>,
}

impl PoolSnapshot {
    pub fn new(ips: Vec<Ipv4Addr>, sources: Vec<SourceResult>) -> Self {
        Self {
            count: ips.len(),
            ips,
            last_updated: Utc::now(),
            sources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    pub fn any_source_succeeded(&self) -> bool {
        self.sources.iter().any(SourceResult::is_success)
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
