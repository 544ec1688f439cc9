use colored::*;
use ipsieve_common::models::pool::{SourceResult, SourceStatus};
use ipsieve_common::models::probe::ProbeOutcome;
use ipsieve_common::models::ranked::RankedEntry;
use ipsieve_protocols::export::UNKNOWN_LOCATION;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn ranked_entry_details(entry: &RankedEntry) -> Vec<Detail> {
    vec![
        ("Latency".to_string(), latency(entry.latency_ms)),
        ("Colo".to_string(), location(entry.location.as_deref())),
    ]
}

pub fn source_details(result: &SourceResult) -> Vec<Detail> {
    let status = match result.status {
        SourceStatus::Success => "success".color(colors::PRIMARY),
        SourceStatus::Error => "error".color(colors::FAILURE).bold(),
    };
    let mut details = vec![
        ("Status".to_string(), status),
        ("Tokens".to_string(), result.count.to_string().color(colors::ACCENT)),
        ("Addresses".to_string(), result.addresses.to_string().color(colors::ACCENT)),
    ];
    if let Some(error) = &result.error {
        details.push(("Error".to_string(), error.color(colors::FAILURE)));
    }
    details
}

pub fn outcome_details(outcome: &ProbeOutcome) -> Vec<Detail> {
    match (outcome.latency_ms(), outcome.error()) {
        (Some(ms), _) => vec![
            ("Status".to_string(), "reachable".color(colors::PRIMARY)),
            ("Latency".to_string(), latency(ms)),
            ("Colo".to_string(), location(outcome.location())),
        ],
        (None, Some(err)) => vec![
            ("Status".to_string(), "unreachable".color(colors::FAILURE).bold()),
            ("Error".to_string(), err.to_string().color(colors::FAILURE)),
        ],
        (None, None) => vec![("Status".to_string(), "unknown".normal())],
    }
}

pub fn addr(addr: impl ToString) -> ColoredString {
    addr.to_string().color(colors::IPV4_ADDR)
}

pub fn latency(ms: u64) -> ColoredString {
    format!("{ms}ms").color(colors::LATENCY)
}

pub fn location(code: Option<&str>) -> ColoredString {
    code.unwrap_or(UNKNOWN_LOCATION).color(colors::LOCATION)
}
