//! Serves stored asset bytes at their `/c4x/...` location.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use courseware_core::assets::content::AssetRecord;
use courseware_core::assets::key::AssetKey;
use courseware_core::assets::service;
use courseware_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalUser};
use crate::state::AppState;

/// GET /c4x/{org}/{course}/{category}/{name}
///
/// Locked assets are only served to staff and users enrolled in the course.
pub async fn serve_asset(
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
    Path((org, course, category, name)): Path<(String, String, String, String)>,
) -> AppResult<Response> {
    let location = format!("/c4x/{org}/{course}/{category}/{name}");
    let key: AssetKey = location.parse().map_err(|_| CoreError::NotFound {
        entity: "Asset",
        id: location.clone(),
    })?;

    let content = service::fetch_asset(
        state.stores.content.as_ref(),
        state.stores.asset_metadata.as_ref(),
        &key,
    )
    .await?;

    if content.record.locked {
        authorize_locked(&state, user.as_ref(), &content.record).await?;
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &content.record.content_type)
        .header(header::CONTENT_LENGTH, content.data.len().to_string())
        .body(Body::from(content.data))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

async fn authorize_locked(
    state: &AppState,
    user: Option<&AuthUser>,
    record: &AssetRecord,
) -> AppResult<()> {
    let Some(user) = user else {
        return Err(locked_error(record));
    };
    if user.is_staff() {
        return Ok(());
    }
    let enrolled = state
        .stores
        .enrollments
        .is_enrolled(&record.course_key, user.user_id)
        .await?;
    if enrolled {
        Ok(())
    } else {
        tracing::debug!(user_id = user.user_id, asset = %record.key, "Locked asset refused");
        Err(locked_error(record))
    }
}

fn locked_error(record: &AssetRecord) -> AppError {
    AppError::Core(CoreError::Forbidden(format!(
        "Asset {} is locked",
        record.key
    )))
}
