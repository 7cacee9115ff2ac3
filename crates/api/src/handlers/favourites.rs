//! Handlers for favourites.
//!
//! Adds and removes are validated here and applied by the favourite worker
//! pool; the response only says the toggle was queued.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use toonshelf_core::jobs::FavouriteAction;
use toonshelf_core::types::DbId;
use toonshelf_db::models::favourite::AddFavourite;
use toonshelf_db::repositories::FavouriteRepo;

use crate::error::AppResult;
use crate::handlers::views::ensure_cartoon;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Acknowledgement for a favourite toggle.
#[derive(Debug, Serialize)]
pub struct FavouriteToggle {
    pub cartoon_id: DbId,
    pub action: FavouriteAction,
    /// `"queued"` or `"already_removed"`.
    pub status: &'static str,
    /// Favourite jobs buffered after this one was queued.
    pub queue_depth: usize,
}

/// POST /api/v1/favourites
pub async fn add_favourite(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AddFavourite>,
) -> AppResult<impl IntoResponse> {
    ensure_cartoon(&state, input.cartoon_id).await?;

    state
        .favourite_pool
        .enqueue_favourite(auth.user_id, input.cartoon_id, FavouriteAction::Add)
        .await;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: FavouriteToggle {
                cartoon_id: input.cartoon_id,
                action: FavouriteAction::Add,
                status: "queued",
                queue_depth: state.favourite_pool.queue_depth(),
            },
        }),
    ))
}

/// GET /api/v1/favourites
pub async fn list_favourites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let favourites = FavouriteRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: favourites }))
}

/// DELETE /api/v1/favourites/{cartoon_id}
///
/// Answers 200 without queueing anything when there is nothing to remove.
/// The check is advisory: the worker's remove is idempotent either way.
pub async fn remove_favourite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(cartoon_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = FavouriteRepo::find(&state.pool, auth.user_id, cartoon_id).await?;

    if existing.is_none() {
        return Ok((
            StatusCode::OK,
            Json(DataResponse {
                data: FavouriteToggle {
                    cartoon_id,
                    action: FavouriteAction::Remove,
                    status: "already_removed",
                    queue_depth: state.favourite_pool.queue_depth(),
                },
            }),
        ));
    }

    state
        .favourite_pool
        .enqueue_favourite(auth.user_id, cartoon_id, FavouriteAction::Remove)
        .await;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: FavouriteToggle {
                cartoon_id,
                action: FavouriteAction::Remove,
                status: "queued",
                queue_depth: state.favourite_pool.queue_depth(),
            },
        }),
    ))
}
