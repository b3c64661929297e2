//! Short-lived key/value cache abstraction
//!
//! Hosts provide an in-process store for JSON values with a per-entry
//! time-to-live. Stores are never persisted; a restart starts empty.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::error::Result;

/// Expiring key/value store.
///
/// Expired entries must be indistinguishable from absent ones: `get`
/// returns `Ok(None)` for both.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::cache::CacheStore;
/// use std::time::Duration;
///
/// async fn remember(cache: &dyn CacheStore, value: serde_json::Value) -> Result<()> {
///     cache.set("addon-item-d1-42", value, Duration::from_secs(30)).await
/// }
/// ```
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous entry
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<()>;

    /// Fetch a live entry
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Drop a single entry
    async fn remove(&self, key: &str) -> Result<()>;

    /// Drop every entry
    async fn clear(&self) -> Result<()>;
}
