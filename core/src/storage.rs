//! [`KeyValueStore`](ipsieve_common::store::KeyValueStore) adapters.
//!
//! * [`MemoryStore`]: process-local, used by tests and one-shot runs.
//! * [`FileStore`]: one JSON document per key under a data directory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
