//! Pool assembly.
//!
//! Runs every source, expands CIDR tokens, validates every candidate and folds
//! them into one ordered set. Assembly itself cannot fail: if every source is
//! down the result is an empty pool plus one error [`SourceResult`] per source.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use ipsieve_common::models::pool::PoolSnapshot;
use ipsieve_common::network::{address, range};
use ipsieve_protocols::tokens::{self, TokenKind};

use crate::sources::{self, SourceFetcher};

pub async fn assemble(fetcher: &dyn SourceFetcher, source_urls: &[String]) -> PoolSnapshot {
    let mut unique: BTreeSet<Ipv4Addr> = BTreeSet::new();
    let mut results = Vec::with_capacity(source_urls.len());

    for url in source_urls {
        let (found, mut result) = sources::fetch_tokens(fetcher, url).await;
        result.addresses = absorb(&found, &mut unique);
        results.push(result);
    }

    let snapshot = PoolSnapshot::new(unique.into_iter().collect(), results);
    tracing::info!(
        pool_size = snapshot.count,
        sources = snapshot.sources.len(),
        "pool assembled"
    );
    snapshot
}

/// Adds every valid candidate from `found` to `unique`. Returns how many valid
/// candidates the tokens produced, duplicates included.
pub fn absorb<S: AsRef<str>>(found: &[S], unique: &mut BTreeSet<Ipv4Addr>) -> usize {
    let mut contributed = 0;
    for token in found {
        for addr in candidates(token.as_ref()) {
            unique.insert(addr);
            contributed += 1;
        }
    }
    contributed
}

/// Ipv4Addr orders by octets, which is the 32-bit numeric order.
pub fn dedup_sorted<S: AsRef<str>>(found: &[S]) -> Vec<Ipv4Addr> {
    let mut unique = BTreeSet::new();
    absorb(found, &mut unique);
    unique.into_iter().collect()
}

fn candidates(token: &str) -> Vec<Ipv4Addr> {
    match tokens::classify(token) {
        TokenKind::Cidr => range::expand(token),
        TokenKind::Address => address::parse_address(token).into_iter().collect(),
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
