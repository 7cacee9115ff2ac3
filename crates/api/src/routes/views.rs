use axum::routing::{get, post};
use axum::Router;

use crate::handlers::views;
use crate::state::AppState;

/// ```text
/// POST /views                  -> record_view
/// GET  /cartoons/{id}/views    -> view_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/views", post(views::record_view))
        .route("/cartoons/{id}/views", get(views::view_count))
}
