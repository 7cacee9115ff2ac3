use std::sync::Arc;

use toonshelf_cache::RecentlyViewedCache;
use toonshelf_worker::{FavouriteWorkerPool, ViewWorkerPool};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pools and config sit behind `Arc`, the cache handle is
/// itself an `Arc` wrapper.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (producer-side reads only).
    pub pool: toonshelf_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Deferred view writes.
    pub view_pool: Arc<ViewWorkerPool>,
    /// Deferred favourite toggles.
    pub favourite_pool: Arc<FavouriteWorkerPool>,
    /// Per-user recently-viewed lists, updated on the request path.
    pub recently_viewed: RecentlyViewedCache,
}
