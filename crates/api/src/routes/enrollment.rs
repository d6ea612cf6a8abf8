use axum::routing::post;
use axum::Router;

use crate::handlers::enrollment;
use crate::state::AppState;

/// POST /courses/{course_id}/enrollment -> enroll
pub fn router() -> Router<AppState> {
    Router::new().route("/courses/{course_id}/enrollment", post(enrollment::enroll))
}
