//! Per-user "recently viewed" list on top of a [`ListStore`].
//!
//! Runs synchronously on the request path so the next read by the same user
//! already sees the update. The list holds at most
//! [`MAX_ENTRIES`](toonshelf_core::recently_viewed::MAX_ENTRIES) cartoon ids,
//! most recent first, with no duplicates, and its whole key expires
//! [`TTL`](toonshelf_core::recently_viewed::TTL) after the last update.

use std::sync::Arc;
use std::time::Duration;

use toonshelf_core::recently_viewed::{list_key, MAX_ENTRIES, TTL};
use toonshelf_core::types::DbId;

use crate::config::{CacheBackend, CacheConfig};
use crate::error::CacheError;
use crate::memory::MemoryListStore;
use crate::redis_store::RedisListStore;
use crate::store::ListStore;

/// Cheaply cloneable handle shared by all handlers.
///
/// A handle built with [`RecentlyViewedCache::disabled`] has no store at all
/// and answers every call with [`CacheError::Unavailable`].
#[derive(Clone)]
pub struct RecentlyViewedCache {
    store: Option<Arc<dyn ListStore>>,
    max_entries: usize,
    ttl: Duration,
}

impl RecentlyViewedCache {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self {
            store: Some(store),
            max_entries: MAX_ENTRIES,
            ttl: TTL,
        }
    }

    pub fn disabled() -> Self {
        Self {
            store: None,
            max_entries: MAX_ENTRIES,
            ttl: TTL,
        }
    }

    /// Build the cache described by `config`.
    ///
    /// A Redis backend that cannot be reached at startup is not fatal: the
    /// feature is switched off for the lifetime of the process.
    pub async fn connect(config: &CacheConfig) -> Self {
        match config.backend {
            CacheBackend::Redis => {
                match RedisListStore::connect(&config.redis_url, config.op_timeout).await {
                    Ok(store) => {
                        tracing::info!(url = %config.redis_url, "Redis connected for recently-viewed cache");
                        Self::new(Arc::new(store))
                    }
                    Err(e) => {
                        tracing::warn!(
                            url = %config.redis_url,
                            error = %e,
                            "Redis connection failed, recently-viewed feature disabled"
                        );
                        Self::disabled()
                    }
                }
            }
            CacheBackend::Memory => {
                tracing::info!("Using in-process memory store for recently-viewed cache");
                Self::new(Arc::new(MemoryListStore::new()))
            }
            CacheBackend::Disabled => {
                tracing::info!("Recently-viewed cache disabled by configuration");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Backend name for health output (`"disabled"` without a store).
    pub fn backend_name(&self) -> &'static str {
        self.store.as_ref().map_or("disabled", |store| store.name())
    }

    fn store(&self) -> Result<&Arc<dyn ListStore>, CacheError> {
        self.store.as_ref().ok_or(CacheError::Unavailable)
    }

    /// Check that the backing store answers.
    pub async fn ping(&self) -> Result<(), CacheError> {
        self.store()?.ping().await
    }

    /// Move `cartoon_id` to the front of `user_id`'s list, cap it and reset
    /// its expiry.
    pub async fn record_view(&self, user_id: DbId, cartoon_id: DbId) -> Result<(), CacheError> {
        let store = self.store()?;
        store
            .record_recent(
                &list_key(user_id),
                &cartoon_id.to_string(),
                self.max_entries,
                self.ttl,
            )
            .await
    }

    /// Cartoon ids most recent first. Absent or expired lists are empty.
    pub async fn get_recently_viewed(&self, user_id: DbId) -> Result<Vec<DbId>, CacheError> {
        let raw = self.store()?.range_all(&list_key(user_id)).await?;
        raw.iter()
            .map(|value| {
                value
                    .parse::<DbId>()
                    .map_err(|_| CacheError::Corrupt(format!("invalid cartoon id '{value}'")))
            })
            .collect()
    }
}
