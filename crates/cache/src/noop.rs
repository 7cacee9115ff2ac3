use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;
use crate::store::ListStore;

/// Accepts every write and never returns anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListStore;

#[async_trait]
impl ListStore for NoopListStore {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn remove_value(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn push_front(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn trim(&self, _key: &str, _max_len: usize) -> Result<(), CacheError> {
        Ok(())
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn range_all(&self, _key: &str) -> Result<Vec<String>, CacheError> {
        Ok(Vec::new())
    }
}
