//! Data carried between pipeline stages and persisted by the store.
//!
//! The serialized field names are the wire format of the persisted views and
//! must stay stable.

pub mod pool;
pub mod probe;
pub mod ranked;
