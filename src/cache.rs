// src/cache.rs

//! Staleness-window cache for content API reads.
//!
//! Mirrors the cache-key conventions the site's query layer uses: each
//! read is keyed by resource and parameters, expires after a per-resource
//! window, and mutations invalidate whole key prefixes so the next read
//! refetches.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-process cache of content API responses.
#[derive(Default)]
pub struct ResourceCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fresh entry; stale entries are treated as absent.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    /// Store a value under a key with its staleness window.
    pub async fn put(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drop every key starting with the given prefix.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write().await;
        entries.retain(|key, _| !key.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fresh_entries_are_returned() {
        let cache = ResourceCache::new();
        cache
            .put("posts:list:1", json!([1, 2]), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("posts:list:1").await, Some(json!([1, 2])));
    }

    #[tokio::test]
    async fn expired_entries_are_treated_as_absent() {
        let cache = ResourceCache::new();
        cache
            .put("posts:list:1", json!([]), Duration::from_secs(0))
            .await;
        assert_eq!(cache.get("posts:list:1").await, None);
    }

    #[tokio::test]
    async fn prefix_invalidation_drops_related_keys_only() {
        let cache = ResourceCache::new();
        let ttl = Duration::from_secs(60);
        cache.put("comments:p1", json!(1), ttl).await;
        cache.put("comments:p2", json!(2), ttl).await;
        cache.put("courses:list", json!(3), ttl).await;

        cache.invalidate_prefix("comments:").await;

        assert_eq!(cache.get("comments:p1").await, None);
        assert_eq!(cache.get("comments:p2").await, None);
        assert_eq!(cache.get("courses:list").await, Some(json!(3)));
    }
}
