use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Ordered-list primitives of a key-structure cache.
///
/// Semantics follow Redis lists: pushing to a missing key creates it, a list
/// left empty by a removal or trim ceases to exist, and expiry applies to the
/// whole key.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Remove every occurrence of `value` from the list at `key`.
    async fn remove_value(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Insert `value` at the head of the list at `key`.
    async fn push_front(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Keep only the first `max_len` elements of the list at `key`.
    async fn trim(&self, key: &str, max_len: usize) -> Result<(), CacheError>;

    /// Expire `key` after `ttl`, replacing any previous expiry.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), CacheError>;

    /// All elements of the list at `key`, head first. Missing keys are empty.
    async fn range_all(&self, key: &str) -> Result<Vec<String>, CacheError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    /// Move `value` to the head of `key`, cap the list at `max_len` and reset
    /// its expiry to `ttl`.
    ///
    /// Implementations must apply the steps atomically, so concurrent calls
    /// for the same `key` never leave `value` in the list twice. The default
    /// issues four separate calls and is only sound for stores without
    /// concurrent writers.
    async fn record_recent(
        &self,
        key: &str,
        value: &str,
        max_len: usize,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.remove_value(key, value).await?;
        self.push_front(key, value).await?;
        self.trim(key, max_len).await?;
        self.expire(key, ttl).await
    }
}
