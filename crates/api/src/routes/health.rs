//! Liveness and dependency status.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct CacheHealth {
    /// `"redis"`, `"memory"`, `"noop"` or `"disabled"`.
    pub backend: &'static str,
    pub healthy: bool,
}

/// Queue pressure of one worker pool.
#[derive(Serialize)]
pub struct PoolHealth {
    pub name: &'static str,
    pub queue_depth: usize,
    pub capacity: usize,
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database answers, `"degraded"` otherwise. The cache
    /// is optional and never degrades the status on its own.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub cache: CacheHealth,
    pub pools: Vec<PoolHealth>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, cache) = tokio::join!(
        toonshelf_db::health_check(&state.pool),
        state.recently_viewed.ping()
    );
    let db_healthy = db.is_ok();

    let pools = [state.view_pool.stats(), state.favourite_pool.stats()]
        .into_iter()
        .map(|stats| PoolHealth {
            name: stats.name,
            queue_depth: stats.queue_depth,
            capacity: stats.capacity,
        })
        .collect();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cache: CacheHealth {
            backend: state.recently_viewed.backend_name(),
            healthy: cache.is_ok(),
        },
        pools,
    })
}

/// `GET /health`, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
