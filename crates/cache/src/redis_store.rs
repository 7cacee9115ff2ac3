//! Redis-backed [`ListStore`].
//!
//! Uses a multiplexed [`ConnectionManager`] that reconnects on its own; every
//! call is bounded by the configured operation timeout so an unresponsive
//! Redis fails fast instead of stalling the request path.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};

use crate::error::CacheError;
use crate::store::ListStore;

#[derive(Clone)]
pub struct RedisListStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisListStore {
    /// Connect to `url` and verify the server answers `PING`.
    pub async fn connect(url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let conn = bounded(op_timeout, client.get_connection_manager()).await?;
        let store = Self { conn, op_timeout };
        store.ping().await?;
        Ok(store)
    }
}

/// Run a Redis future under `limit`, mapping elapsed time to
/// [`CacheError::Timeout`].
async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, CacheError>
where
    F: Future<Output = RedisResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(CacheError::from),
        Err(_) => Err(CacheError::Timeout(
            u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}

/// Redis takes whole seconds; never send 0, which would delete the key.
fn ttl_secs(ttl: Duration) -> i64 {
    ttl.as_secs().max(1) as i64
}

#[async_trait]
impl ListStore for RedisListStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn remove_value(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: i64 = bounded(self.op_timeout, conn.lrem(key, 0, value)).await?;
        Ok(())
    }

    async fn push_front(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: i64 = bounded(self.op_timeout, conn.lpush(key, value)).await?;
        Ok(())
    }

    async fn trim(&self, key: &str, max_len: usize) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        if max_len == 0 {
            let _: i64 = bounded(self.op_timeout, conn.del(key)).await?;
            return Ok(());
        }
        let _: () = bounded(self.op_timeout, conn.ltrim(key, 0, max_len as isize - 1)).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: i64 = bounded(self.op_timeout, conn.expire(key, ttl_secs(ttl))).await?;
        Ok(())
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.conn.clone();
        bounded(self.op_timeout, conn.lrange(key, 0, -1)).await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: String = bounded(self.op_timeout, redis::cmd("PING").query_async(&mut conn)).await?;
        Ok(())
    }

    /// LREM, LPUSH, LTRIM and EXPIRE in one `MULTI`/`EXEC` round trip.
    async fn record_recent(
        &self,
        key: &str,
        value: &str,
        max_len: usize,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let stop = max_len.max(1) as isize - 1;
        let mut pipe = redis::pipe();
        pipe.atomic()
            .lrem(key, 0, value)
            .ignore()
            .lpush(key, value)
            .ignore()
            .ltrim(key, 0, stop)
            .ignore()
            .expire(key, ttl_secs(ttl))
            .ignore();

        let mut conn = self.conn.clone();
        let _: () = bounded(self.op_timeout, pipe.query_async(&mut conn)).await?;
        Ok(())
    }
}
