//! Best-effort key-structure cache for toonshelf.
//!
//! The cache is a side channel: every caller must tolerate it being slow,
//! empty or gone. [`ListStore`] exposes the handful of list primitives the
//! recently-viewed protocol needs, and [`RecentlyViewedCache`] composes them.

pub mod config;
pub mod error;
pub mod memory;
pub mod noop;
pub mod recently_viewed;
pub mod redis_store;
pub mod store;

pub use config::{CacheBackend, CacheConfig};
pub use error::CacheError;
pub use memory::MemoryListStore;
pub use noop::NoopListStore;
pub use recently_viewed::RecentlyViewedCache;
pub use redis_store::RedisListStore;
pub use store::ListStore;
