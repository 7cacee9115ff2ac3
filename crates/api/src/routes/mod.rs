pub mod admin;
pub mod favourites;
pub mod health;
pub mod views;

use axum::routing::get;
use axum::Router;

use crate::handlers::recently_viewed;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /views                          record a view (POST, 202)
/// /cartoons/{id}/views            view count (GET)
///
/// /favourites                     list (GET), add (POST, 202)
/// /favourites/{cartoon_id}        remove (DELETE, 202 or 200)
///
/// /recently-viewed                caller's recently-viewed cartoons (GET)
///
/// /admin/worker-pools             pool stats (GET, admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(views::router())
        .nest("/favourites", favourites::router())
        .route(
            "/recently-viewed",
            get(recently_viewed::get_recently_viewed),
        )
        .nest("/admin", admin::router())
}
