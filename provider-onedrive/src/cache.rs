//! Short-lived cache of raw item records
//!
//! Listings cache every record they walk so that a follow-up single-item
//! lookup (typically right before playback) needs no extra request.

use std::sync::Arc;
use std::time::Duration;

use bridge_traits::cache::CacheStore;
use tracing::{debug, warn};

use crate::types::RawRecord;

/// Item record cache keyed by `{namespace}-item-{drive_id}-{item_id}`.
///
/// Store failures are logged and treated as a miss; they never fail the
/// calling operation.
#[derive(Clone)]
pub struct ItemCache {
    store: Arc<dyn CacheStore>,
    namespace: String,
    ttl: Duration,
}

impl ItemCache {
    pub fn new(store: Arc<dyn CacheStore>, namespace: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            ttl,
        }
    }

    pub fn key(&self, drive_id: &str, item_id: &str) -> String {
        format!("{}-item-{}-{}", self.namespace, drive_id, item_id)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn put(&self, drive_id: &str, item_id: &str, record: &RawRecord) {
        let key = self.key(drive_id, item_id);
        if let Err(e) = self
            .store
            .set(&key, record.as_value().clone(), self.ttl)
            .await
        {
            warn!(key = %key, error = %e, "Failed to cache item record");
        }
    }

    pub async fn get(&self, drive_id: &str, item_id: &str) -> Option<RawRecord> {
        let key = self.key(drive_id, item_id);
        match self.store.get(&key).await {
            Ok(Some(value)) => {
                debug!(key = %key, "Item cache hit");
                Some(RawRecord::new(value))
            }
            Ok(None) => {
                debug!(key = %key, "Item cache miss");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Item cache lookup failed, treating as miss");
                None
            }
        }
    }
}

impl std::fmt::Debug for ItemCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemCache")
            .field("namespace", &self.namespace)
            .field("ttl", &self.ttl)
            .finish()
    }
}
