use ipsieve_common::models::probe::ProbeOutcome;
use ipsieve_common::models::ranked::{Provenance, RankedEntry, RankedSet};

/// Ranks the successful outcomes by latency and keeps the fastest `cap`.
///
/// The sort is stable, so equal latencies keep their input order. Failed
/// outcomes are ignored.
pub fn select(outcomes: &[ProbeOutcome], cap: usize) -> RankedSet {
    let mut entries: Vec<RankedEntry> = outcomes.iter().filter_map(RankedEntry::from_outcome).collect();
    entries.sort_by_key(|entry| entry.latency_ms);
    entries.truncate(cap);
    RankedSet::new(entries, Provenance::BackendAuto)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
