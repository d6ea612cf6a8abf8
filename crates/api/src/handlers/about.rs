//! Course about page.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use courseware_core::assets::key::CourseKey;
use courseware_core::course::gate::AboutDecision;
use courseware_core::course::service;

use super::course_not_found;
use crate::error::AppResult;
use crate::middleware::auth::OptionalUser;
use crate::render::about::render_about_page;
use crate::state::AppState;

/// GET /courses/{course_id}/about
pub async fn about_page(
    user: OptionalUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Response> {
    let course: CourseKey = course_id
        .parse()
        .map_err(|_| course_not_found(&course_id))?;

    let decision = service::about_page(
        &state.stores,
        &course,
        &user.viewer(),
        &state.config.features,
        Utc::now(),
    )
    .await?;

    match decision {
        AboutDecision::Redirect(location) => {
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        AboutDecision::NotFound => Err(course_not_found(&course_id).into()),
        AboutDecision::Render(page) => Ok(Html(render_about_page(&page)).into_response()),
    }
}
