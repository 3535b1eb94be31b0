// Follow list cache.
// Keeps one TTL-bounded record per normalized login on top of a key-value store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::twitch::FollowListResult;

use super::paths::{FOLLOWS_PREFIX, follows_key};
use super::store::KeyValueStore;

/// Follow lists are considered fresh for 12 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Cached follow list with its storage time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    #[serde(flatten)]
    pub value: FollowListResult,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stored now.
    pub fn new(value: FollowListResult) -> Self {
        Self {
            value,
            stored_at: Utc::now(),
        }
    }

    /// Age of the entry. Timestamps in the future count as zero.
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}

/// TTL cache of follow lists keyed by `follows:<login>`.
#[derive(Clone)]
pub struct FollowsCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl FollowsCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a login's follow list. Expired entries are deleted and reported as a miss.
    pub async fn get(&self, login: &str) -> Result<Option<FollowListResult>> {
        Ok(self.get_entry(login).await?.map(|entry| entry.value))
    }

    /// Like [`get`](Self::get) but keeps the storage timestamp.
    pub async fn get_entry(&self, login: &str) -> Result<Option<CacheEntry>> {
        let key = follows_key(login);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(None);
        };

        let entry: CacheEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Dropping undecodable cache entry");
                self.store.remove(&key).await?;
                return Ok(None);
            }
        };

        if entry.is_expired(self.ttl) {
            debug!(key = %key, age_secs = entry.age().as_secs(), "Cache entry expired, removing");
            self.store.remove(&key).await?;
            return Ok(None);
        }

        Ok(Some(entry))
    }

    /// Store a follow list, stamped with the current time.
    pub async fn put(&self, login: &str, value: &FollowListResult) -> Result<()> {
        self.put_entry(login, &CacheEntry::new(value.clone())).await
    }

    pub(crate) async fn put_entry(&self, login: &str, entry: &CacheEntry) -> Result<()> {
        let key = follows_key(login);
        self.store.set(&key, serde_json::to_value(entry)?).await?;
        debug!(key = %key, items = entry.value.items.len(), partial = entry.value.is_partial, "Cached follow list");
        Ok(())
    }

    /// Remove one login's entry.
    pub async fn invalidate(&self, login: &str) -> Result<()> {
        self.store.remove(&follows_key(login)).await
    }

    /// Remove every follow list entry and return how many were removed.
    pub async fn invalidate_all(&self) -> Result<usize> {
        let keys: Vec<String> = self
            .store
            .keys()
            .await?
            .into_iter()
            .filter(|k| k.starts_with(FOLLOWS_PREFIX))
            .collect();

        if !keys.is_empty() {
            self.store.remove_many(&keys).await?;
        }
        debug!(count = keys.len(), "Invalidated follows cache");
        Ok(keys.len())
    }
}
