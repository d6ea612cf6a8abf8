//! Self-service enrollment.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use courseware_core::course::service;
use serde::Serialize;

use super::parse_course_key;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub course_id: String,
    pub courseware_url: String,
}

/// POST /api/v1/courses/{course_id}/enrollment
///
/// Enrolls the caller when the about page would offer free registration.
/// Otherwise 400 with the about page's notice.
pub async fn enroll(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<DataResponse<EnrollmentResponse>>> {
    let course = parse_course_key(&course_id)?;
    let courseware_url = service::enroll(
        &state.stores,
        &course,
        &user.identity(),
        &state.config.features,
        Utc::now(),
    )
    .await?;

    Ok(Json(DataResponse {
        data: EnrollmentResponse {
            course_id: course.url_segment(),
            courseware_url,
        },
    }))
}
