use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/worker-pools
///
/// Queue depth and lifetime counters for the view and favourite pools.
pub async fn list_pool_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = vec![state.view_pool.stats(), state.favourite_pool.stats()];
    Ok(Json(DataResponse { data: stats }))
}
