//! Route definitions for course assets.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// ```text
/// GET    /courses/{course_id}/assets               -> list_assets
/// POST   /courses/{course_id}/assets               -> upload_asset
/// POST   /courses/{course_id}/assets/{asset_name}  -> update_asset
/// PUT    /courses/{course_id}/assets/{asset_name}  -> update_asset
/// DELETE /courses/{course_id}/assets/{asset_name}  -> delete_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/courses/{course_id}/assets",
            get(assets::list_assets).post(assets::upload_asset),
        )
        .route(
            "/courses/{course_id}/assets/{asset_name}",
            post(assets::update_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
}
