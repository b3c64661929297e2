//! In-memory `CacheStore`

use async_trait::async_trait;
use bridge_traits::{
    cache::CacheStore,
    error::{BridgeError, Result},
    time::{Clock, SystemClock},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::trace;

struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// Process-local expiring cache.
///
/// Entries expire `ttl` after they were written, measured with the injected
/// [`Clock`]. Every write drops all expired entries first, so the map only
/// holds what is still live plus whatever expired since the last write.
/// Reads evict the expired key they hit. Nothing is written to disk.
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn purge_expired(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before - entries.len())
    }

    /// Number of stored entries, live or not yet purged
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|_| BridgeError::OperationFailed("Cache lock poisoned".to_string()))
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid cache TTL: {}", e)))?;
        let now = self.clock.now();
        let expires_at = now + ttl;

        let mut entries = self.lock()?;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
        trace!(key, %expires_at, live = entries.len(), "Cache entry stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let now = self.clock.now();
        let mut entries = self.lock()?;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
            trace!(key, "Cache entry expired");
        }
        Ok(None)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}
