//! IPv4 candidate handling: syntax validation and CIDR expansion.

pub mod address;
pub mod range;
