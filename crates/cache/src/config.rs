use std::time::Duration;

/// Which list store backs the recently-viewed cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
    Disabled,
}

impl CacheBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            "disabled" | "none" | "off" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Cache configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    /// Upper bound on any single cache call.
    pub op_timeout: Duration,
}

/// Default per-operation timeout in milliseconds.
const DEFAULT_OP_TIMEOUT_MS: u64 = 5000;

impl CacheConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                              |
    /// |-----------------------|--------------------------------------|
    /// | `CACHE_BACKEND`       | `redis`                              |
    /// | `REDIS_URL`           | `redis://{REDIS_HOST}:{REDIS_PORT}`  |
    /// | `REDIS_HOST`          | `localhost`                          |
    /// | `REDIS_PORT`          | `6379`                               |
    /// | `CACHE_OP_TIMEOUT_MS` | `5000`                               |
    pub fn from_env() -> Self {
        let backend = std::env::var("CACHE_BACKEND")
            .map(|raw| {
                CacheBackend::parse(&raw)
                    .unwrap_or_else(|| panic!("CACHE_BACKEND must be redis, memory or disabled, got '{raw}'"))
            })
            .unwrap_or(CacheBackend::Redis);

        let redis_url = std::env::var("REDIS_URL").unwrap_or_else(|_| {
            let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".into());
            let port = std::env::var("REDIS_PORT").unwrap_or_else(|_| "6379".into());
            format!("redis://{host}:{port}")
        });

        let op_timeout_ms: u64 = std::env::var("CACHE_OP_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_OP_TIMEOUT_MS.to_string())
            .parse()
            .expect("CACHE_OP_TIMEOUT_MS must be a valid u64");

        Self {
            backend,
            redis_url,
            op_timeout: Duration::from_millis(op_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse() {
        assert_eq!(CacheBackend::parse("Redis"), Some(CacheBackend::Redis));
        assert_eq!(CacheBackend::parse(" memory "), Some(CacheBackend::Memory));
        assert_eq!(CacheBackend::parse("off"), Some(CacheBackend::Disabled));
        assert_eq!(CacheBackend::parse("memcached"), None);
    }
}
