//! Handlers for view recording and view counts.
//!
//! Recording a view is split in two: the recently-viewed list is updated on
//! the request path so the caller's next read sees it, while the analytics
//! row is written behind by the view worker pool.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use toonshelf_core::error::CoreError;
use toonshelf_core::types::DbId;
use toonshelf_db::models::view::{RecordView, ViewCount};
use toonshelf_db::repositories::{CartoonRepo, ViewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Acknowledgement for a deferred write.
#[derive(Debug, Serialize)]
pub struct Accepted {
    pub cartoon_id: DbId,
    pub status: &'static str,
}

/// Return 400 for an impossible id and 404 unless `cartoon_id` exists.
pub(crate) async fn ensure_cartoon(state: &AppState, cartoon_id: DbId) -> AppResult<()> {
    if cartoon_id <= 0 {
        return Err(AppError::BadRequest(format!(
            "cartoon_id must be positive, got {cartoon_id}"
        )));
    }
    if CartoonRepo::exists(&state.pool, cartoon_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Cartoon",
            id: cartoon_id,
        }))
    }
}

/// POST /api/v1/views
pub async fn record_view(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RecordView>,
) -> AppResult<impl IntoResponse> {
    ensure_cartoon(&state, input.cartoon_id).await?;

    if let Err(e) = state
        .recently_viewed
        .record_view(auth.user_id, input.cartoon_id)
        .await
    {
        tracing::warn!(
            user_id = auth.user_id,
            cartoon_id = input.cartoon_id,
            error = %e,
            "Recently-viewed update failed, continuing"
        );
    }

    state
        .view_pool
        .enqueue_view(auth.user_id, input.cartoon_id)
        .await;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: Accepted {
                cartoon_id: input.cartoon_id,
                status: "queued",
            },
        }),
    ))
}

/// GET /api/v1/cartoons/{id}/views
///
/// Counts only views the worker pool has already written.
pub async fn view_count(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(cartoon_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_cartoon(&state, cartoon_id).await?;
    let total_views = ViewRepo::count_for_cartoon(&state.pool, cartoon_id).await?;

    Ok(Json(DataResponse {
        data: ViewCount {
            cartoon_id,
            total_views,
        },
    }))
}
