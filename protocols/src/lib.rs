//! Text-level formats the pipeline reads and writes.
//!
//! * [`tokens`]: mining address/CIDR tokens out of free-form source documents.
//! * [`trace`]: the location code carried by the probe endpoint's trace header.
//! * [`export`]: newline-separated text renderings of persisted views.

pub mod export;
pub mod tokens;
pub mod trace;
