use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::favourites;
use crate::state::AppState;

/// Favourite routes mounted at `/favourites`.
///
/// ```text
/// GET    /                -> list_favourites
/// POST   /                -> add_favourite
/// DELETE /{cartoon_id}    -> remove_favourite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(favourites::list_favourites).post(favourites::add_favourite),
        )
        .route("/{cartoon_id}", delete(favourites::remove_favourite))
}
