use ipsieve_common::models::pool::PoolSnapshot;
use ipsieve_common::models::ranked::{RankedEntry, RankedSet};

pub const UNKNOWN_LOCATION: &str = "UNK";

/// One address per line, pool order.
pub fn pool_lines(snapshot: &PoolSnapshot) -> String {
    snapshot
        .ips
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `ADDR#LOC:NNms` per line, ranked order.
pub fn ranked_lines(set: &RankedSet) -> String {
    set.entries
        .iter()
        .map(ranked_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ranked_line(entry: &RankedEntry) -> String {
    let location = entry.location.as_deref().unwrap_or(UNKNOWN_LOCATION);
    format!("{}#{}:{}ms", entry.addr, location, entry.latency_ms)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use ipsieve_common::models::ranked::Provenance;
    use std::net::Ipv4Addr;

    #[test]
    fn ranked_lines_fall_back_to_unknown_location() {
        let set = RankedSet::new(
            vec![
                RankedEntry {
                    addr: Ipv4Addr::new(192, 0, 2, 1),
                    latency_ms: 31,
                    location: Some("NRT".into()),
                },
                RankedEntry {
                    addr: Ipv4Addr::new(192, 0, 2, 2),
                    latency_ms: 48,
                    location: None,
                },
            ],
            Provenance::BackendAuto,
        );

        assert_eq!(ranked_lines(&set), "192.0.2.1#NRT:31ms\n192.0.2.2#UNK:48ms");
    }

    #[test]
    fn pool_lines_one_per_row() {
        let snapshot = PoolSnapshot::new(
            vec![Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 5)],
            Vec::new(),
        );
        assert_eq!(pool_lines(&snapshot), "192.0.2.1\n192.0.2.5");
    }

    #[test]
    fn empty_views_render_empty() {
        assert_eq!(ranked_lines(&RankedSet::new(Vec::new(), Provenance::ClientUpload)), "");
        assert_eq!(pool_lines(&PoolSnapshot::new(Vec::new(), Vec::new())), "");
    }
}
