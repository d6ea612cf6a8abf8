pub mod about;
pub mod assets;
pub mod content;
pub mod enrollment;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /courses/{course_id}/assets                  list, upload (staff)
/// /courses/{course_id}/assets/{asset_name}     lock (POST|PUT), delete (staff)
/// /courses/{course_id}/enrollment              enroll (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(assets::router())
        .merge(enrollment::router())
}

/// Page routes served at the root, outside `/api/v1`.
///
/// ```text
/// /c4x/{org}/{course}/{category}/{name}        asset bytes
/// /courses/{course_id}/about                   about page
/// ```
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .merge(content::router())
        .merge(about::router())
}
