use axum::routing::get;
use axum::Router;

use crate::handlers::worker_pools;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new().route("/worker-pools", get(worker_pools::list_pool_stats))
}
