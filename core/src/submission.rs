//! Client-submitted ranked sets.
//!
//! Order, size and latencies are kept as submitted: nothing is re-measured,
//! merged with the backend set or capped. Each entry is normalized though.
//! Keys are stored as `ip`/`latency`/`colo` whichever spelling came in, and
//! fields outside those three are dropped. Authorization happens in
//! [`crate::pipeline::Pipeline`] before this is reached.

use ipsieve_common::error::SubmissionError;
use ipsieve_common::models::ranked::{Provenance, RankedEntry, RankedSet};
use serde::Deserialize;
use serde_json::Value;

/// Validates a submission: a JSON list of `{address, latencyMs, locationCode}`
/// entries (the short `ip`/`latency`/`colo` spellings are accepted too).
pub fn accept_submission(payload: &Value) -> Result<RankedSet, SubmissionError> {
    let Value::Array(items) = payload else {
        return Err(SubmissionError::NotAList);
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            RankedEntry::deserialize(item).map_err(|e| SubmissionError::BadEntry {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RankedSet::new(entries, Provenance::ClientUpload))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
