//! Latency probing.
//!
//! A probe is one timed download through a specific candidate address. It
//! never errors past its own boundary: timeouts, connection failures and bad
//! statuses all come back as a failed [`ProbeOutcome`].

use std::net::Ipv4Addr;

use async_trait::async_trait;
use ipsieve_common::models::probe::ProbeOutcome;

mod http;

pub use http::HttpProber;

#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeOutcome;
}
