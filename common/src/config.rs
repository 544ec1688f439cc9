use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/cmliu/cmliu/refs/heads/main/CF-CIDR.txt";

/// Tunables for one pipeline instance.
///
/// Built once at startup (defaults, then an optional JSON file, then CLI
/// overrides) and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Upper bound on the backend ranked set.
    pub fast_ip_count: usize,
    /// Addresses probed per refresh, drawn from the shuffled pool.
    pub sample_cap: usize,
    /// Probes in flight at once.
    pub batch_size: usize,
    pub batch_pause_ms: u64,
    pub fetch_timeout_ms: u64,
    pub probe_timeout_ms: u64,
    pub probe_bytes: u64,
    /// Logical host of the download endpoint. The connection itself goes to
    /// the candidate address.
    pub probe_host: String,
    pub probe_port: u16,
    /// Response header whose last dash-separated segment is the location code.
    pub trace_header: String,
    pub source_urls: Vec<String>,
    pub refresh_interval_secs: u64,
    /// Skip probing when no source could be fetched during a refresh.
    pub strict: bool,
    pub session_ttl_secs: u64,
    pub token_ttl_days: i64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fast_ip_count: 25,
            sample_cap: 500,
            batch_size: 5,
            batch_pause_ms: 200,
            fetch_timeout_ms: 8_000,
            probe_timeout_ms: 5_000,
            probe_bytes: 1_000,
            probe_host: "speed.cloudflare.com".to_string(),
            probe_port: 443,
            trace_header: "cf-ray".to_string(),
            source_urls: vec![DEFAULT_SOURCE_URL.to_string()],
            refresh_interval_secs: 3_600,
            strict: false,
            session_ttl_secs: 86_400,
            token_ttl_days: 30,
            user_agent: format!("ipsieve/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn fast_ip_count(&self) -> usize {
        self.fast_ip_count.max(1)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn probe_url(&self) -> String {
        format!("https://{}/__down?bytes={}", self.probe_host, self.probe_bytes)
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
