/// Errors surfaced by cache backends.
///
/// None of these are fatal to a request: callers log them and carry on
/// without the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// No cache backend is configured or it failed its startup check.
    #[error("Cache unavailable")]
    Unavailable,

    /// The backend did not answer within the configured operation timeout.
    #[error("Cache operation timed out after {0} ms")]
    Timeout(u64),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A stored value could not be decoded.
    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),
}
