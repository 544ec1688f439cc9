//! # ipsieve core
//!
//! The candidate acquisition and latency ranking pipeline:
//!
//! 1. [`sources`] fetch text documents and mine address/CIDR tokens.
//! 2. [`pool`] expands, validates and deduplicates them into a snapshot.
//! 3. [`batch`] samples the pool and drives the [`probe`]r in fixed-size batches.
//! 4. [`select`] ranks successful probes into the backend ranked set.
//!
//! [`submission`] accepts externally ranked sets, [`access`] guards privileged
//! operations, and [`pipeline::Pipeline`] ties it all to the persistence port.
//! [`driver`] runs the whole refresh on a timer.

pub mod access;
pub mod batch;
pub mod driver;
pub mod pipeline;
pub mod pool;
pub mod probe;
pub mod select;
pub mod sources;
pub mod storage;
pub mod submission;
