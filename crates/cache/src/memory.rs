//! In-process list store with Redis-like list and expiry semantics.
//!
//! Used for local development without Redis and throughout the tests. Expiry
//! is measured with [`tokio::time::Instant`], so paused-clock tests can step
//! over a TTL without sleeping.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::CacheError;
use crate::store::ListStore;

#[derive(Debug)]
struct Entry {
    items: VecDeque<String>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Default)]
pub struct MemoryListStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining time to live of `key`, or `None` if it is missing or has no
    /// expiry.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let mut entries = self.entries.lock().await;
        let entry = live_entry(&mut entries, key)?;
        entry
            .expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

/// Look up `key`, evicting it first if its expiry has passed.
fn live_entry<'a>(entries: &'a mut HashMap<String, Entry>, key: &str) -> Option<&'a mut Entry> {
    if entries
        .get(key)
        .is_some_and(|entry| entry.is_expired(Instant::now()))
    {
        entries.remove(key);
    }
    entries.get_mut(key)
}

/// Drop `key` once its list is empty.
fn remove_if_empty(entries: &mut HashMap<String, Entry>, key: &str) {
    if entries.get(key).is_some_and(|entry| entry.items.is_empty()) {
        entries.remove(key);
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn remove_value(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = live_entry(&mut entries, key) {
            entry.items.retain(|item| item != value);
        }
        remove_if_empty(&mut entries, key);
        Ok(())
    }

    async fn push_front(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        if live_entry(&mut entries, key).is_none() {
            entries.insert(
                key.to_string(),
                Entry {
                    items: VecDeque::new(),
                    expires_at: None,
                },
            );
        }
        if let Some(entry) = entries.get_mut(key) {
            entry.items.push_front(value.to_string());
        }
        Ok(())
    }

    async fn trim(&self, key: &str, max_len: usize) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = live_entry(&mut entries, key) {
            entry.items.truncate(max_len);
        }
        remove_if_empty(&mut entries, key);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = live_entry(&mut entries, key) {
            entry.expires_at = Some(Instant::now() + ttl);
        }
        Ok(())
    }

    async fn record_recent(
        &self,
        key: &str,
        value: &str,
        max_len: usize,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        if max_len == 0 {
            entries.remove(key);
            return Ok(());
        }
        if live_entry(&mut entries, key).is_none() {
            entries.insert(
                key.to_string(),
                Entry {
                    items: VecDeque::new(),
                    expires_at: None,
                },
            );
        }
        if let Some(entry) = entries.get_mut(key) {
            entry.items.retain(|item| item != value);
            entry.items.push_front(value.to_string());
            entry.items.truncate(max_len);
            entry.expires_at = Some(Instant::now() + ttl);
        }
        Ok(())
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, CacheError> {
        let mut entries = self.entries.lock().await;
        Ok(live_entry(&mut entries, key)
            .map(|entry| entry.items.iter().cloned().collect())
            .unwrap_or_default())
    }
}
