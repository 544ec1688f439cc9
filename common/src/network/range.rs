//! # CIDR Expansion
//!
//! Turns `base/prefix` tokens into concrete candidate addresses.
//!
//! Expansion starts at the base address exactly as written (host bits are not
//! masked off) and emits consecutive addresses. Every block is truncated to
//! [`MAX_EXPANSION`] addresses: a `/8` contributes its first 256 addresses, not
//! 16.7M. Large blocks are therefore under-represented in the pool and always
//! represented by their lowest addresses. This is a sampling bias, kept on
//! purpose to bound pool size.

use std::net::Ipv4Addr;

use super::address;

pub const MAX_EXPANSION: u64 = 256;

/// A continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u64 {
        let start = u64::from(u32::from(self.start_addr));
        let end = u64::from(u32::from(self.end_addr));
        (end + 1).saturating_sub(start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the capped range for `base/prefix`.
///
/// The block nominally spans `2^(32 - prefix)` addresses; at most
/// [`MAX_EXPANSION`] are kept, and the range never wraps past
/// `255.255.255.255`. `prefix >= 32` yields the base address alone.
pub fn capped_range(base: Ipv4Addr, prefix: u8) -> Ipv4Range {
    if prefix >= 32 {
        return Ipv4Range::new(base, base);
    }

    let block: u64 = 1u64 << (32 - u32::from(prefix));
    let span: u64 = block.min(MAX_EXPANSION);
    let start: u64 = u64::from(u32::from(base));
    let end: u64 = (start + span - 1).min(u64::from(u32::MAX));

    Ipv4Range::new(base, Ipv4Addr::from(end as u32))
}

/// Expands a `base/prefix` token into candidate addresses.
///
/// An unparseable or out-of-range prefix falls back to the base address. A
/// malformed base address yields nothing: the token is dropped, not reported.
pub fn expand(token: &str) -> Vec<Ipv4Addr> {
    let (base_str, prefix_str) = match token.split_once('/') {
        Some(parts) => parts,
        None => (token, ""),
    };

    let Some(base) = address::parse_address(base_str) else {
        return Vec::new();
    };

    match prefix_str.parse::<u8>() {
        Ok(prefix) if prefix < 32 => capped_range(base, prefix).iter().collect(),
        _ => vec![base],
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
