//! Persistence port.
//!
//! The pipeline needs nothing beyond `get` and `put` of JSON values. Every
//! write replaces the previous value for that key wholesale; there is no
//! versioning, so two writers racing on one key resolve as last-writer-wins.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

pub mod keys {
    pub const POOL_SNAPSHOT: &str = "ip_pool";
    pub const BACKEND_RANKED_SET: &str = "fast_ips";
    pub const CLIENT_RANKED_SET: &str = "client_fast_ips";
    pub const TOKEN_CONFIG: &str = "token_config";

    pub fn session(id: &str) -> String {
        format!("session_{id}")
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` for missing or expired keys.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn put(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<(), StoreError>;
}

pub async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(value)?;
    store.put(key, value, ttl).await
}
