//! Handler for the caller's recently-viewed list.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use toonshelf_core::types::DbId;
use toonshelf_db::models::cartoon::Cartoon;
use toonshelf_db::repositories::CartoonRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecentlyViewed {
    /// Most recent first, as stored in the cache.
    pub cartoon_ids: Vec<DbId>,
    /// The same cartoons in the same order. Ids whose cartoon has since been
    /// deleted are skipped.
    pub cartoons: Vec<Cartoon>,
}

/// GET /api/v1/recently-viewed
///
/// A cache failure yields an empty list rather than an error.
pub async fn get_recently_viewed(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let cartoon_ids = match state.recently_viewed.get_recently_viewed(auth.user_id).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(user_id = auth.user_id, error = %e, "Recently-viewed read failed");
            Vec::new()
        }
    };

    let cartoons = CartoonRepo::find_many_ordered(&state.pool, &cartoon_ids).await?;

    Ok(Json(DataResponse {
        data: RecentlyViewed {
            cartoon_ids,
            cartoons,
        },
    }))
}
