use axum::routing::get;
use axum::Router;

use crate::handlers::about;
use crate::state::AppState;

/// GET /courses/{course_id}/about -> about_page
pub fn router() -> Router<AppState> {
    Router::new().route("/courses/{course_id}/about", get(about::about_page))
}
