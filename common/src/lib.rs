//! Shared building blocks for `ipsieve`.
//!
//! Everything in here is free of network I/O: the immutable [`config::Config`],
//! the data model persisted by the pipeline, the address validator and range
//! expander, the persistence port, and the error taxonomy.

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod print;
pub mod store;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
