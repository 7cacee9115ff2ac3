use std::str::FromStr;

use toonshelf_cache::CacheConfig;
use toonshelf_worker::PoolConfig;

use crate::auth::jwt::JwtConfig;

/// Everything the server reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Recently-viewed cache backend and per-call timeout.
    pub cache: CacheConfig,
    pub view_pool: PoolConfig,
    pub favourite_pool: PoolConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    ///
    /// JWT, cache and pool settings come from [`JwtConfig::from_env`],
    /// [`CacheConfig::from_env`] and [`PoolConfig::from_env`] (prefixes
    /// `VIEW` and `FAVOURITE`).
    ///
    /// # Panics
    ///
    /// Panics on values that do not parse and on a zero-sized pool.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            cache: CacheConfig::from_env(),
            view_pool: pool_from_env("VIEW"),
            favourite_pool: pool_from_env("FAVOURITE"),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

fn pool_from_env(prefix: &str) -> PoolConfig {
    let config = PoolConfig::from_env(prefix);
    if let Err(e) = config.validate() {
        panic!("invalid {prefix}_POOL_* settings: {e}");
    }
    config
}
