//! Handlers for a course's "Files & Uploads" assets.
//!
//! Listing, upload, lock toggling, and removal. All routes require the
//! `staff` role.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use courseware_core::assets::json::AssetJson;
use courseware_core::assets::key::ASSET_CATEGORY;
use courseware_core::assets::service;
use courseware_core::files::UploadedFile;
use serde::Deserialize;

use super::parse_course_key;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::AssetListParams;
use crate::render::assets::render_asset_index;
use crate::response::{AssetListResponse, UploadResponse};
use crate::state::AppState;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// Request body for lock updates. Other asset fields are ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateAssetRequest {
    pub locked: Option<bool>,
}

/// GET /api/v1/courses/{course_id}/assets
///
/// One page of the course's assets. JSON unless `format=html` or the
/// `Accept` header asks for HTML.
pub async fn list_assets(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<AssetListParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let course = parse_course_key(&course_id)?;
    let query = params.to_query(state.config.asset_page_size);

    let page = service::list_course_assets(
        state.stores.content.as_ref(),
        &course,
        &query,
        &state.categories,
    )
    .await?;

    let lms_base = &state.config.lms_base;
    let listing = AssetListResponse {
        start: page.start,
        end: page.end(),
        page: page.page,
        page_size: page.page_size,
        total_count: page.total_count,
        assets: page.items.iter().map(|r| r.to_json(lms_base)).collect(),
        sort: query.sort.as_str(),
    };

    if wants_html(params.format.as_deref(), &headers) {
        let html = render_asset_index(&course, &listing, state.config.max_upload_bytes);
        return Ok(Html(html).into_response());
    }
    Ok(Json(listing).into_response())
}

/// POST /api/v1/courses/{course_id}/assets
///
/// Multipart upload with a `file` field. Uploading an existing name replaces
/// that asset.
pub async fn upload_asset(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let course = parse_course_key(&course_id)?;

    let mut upload: Option<UploadedFile> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        upload = Some(UploadedFile {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    let record = service::upload_asset(
        state.stores.content.as_ref(),
        &course,
        upload,
        state.config.max_upload_bytes,
        None,
    )
    .await?;

    tracing::debug!(user_id = staff.user_id, asset = %record.key, "Upload handled");
    Ok(Json(UploadResponse {
        asset: record.to_json(&state.config.lms_base),
        msg: "Upload completed",
    }))
}

/// POST|PUT /api/v1/courses/{course_id}/assets/{asset_name}
///
/// Set the asset's `locked` flag. Returns 201 with the updated asset.
pub async fn update_asset(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path((course_id, asset_name)): Path<(String, String)>,
    Json(input): Json<UpdateAssetRequest>,
) -> AppResult<(StatusCode, Json<AssetJson>)> {
    let course = parse_course_key(&course_id)?;
    let locked = input
        .locked
        .ok_or_else(|| AppError::BadRequest("Missing required 'locked' field".into()))?;
    let key = course.make_asset_key(ASSET_CATEGORY, &asset_name);

    let record = service::set_locked(state.stores.content.as_ref(), &key, locked).await?;
    Ok((
        StatusCode::CREATED,
        Json(record.to_json(&state.config.lms_base)),
    ))
}

/// DELETE /api/v1/courses/{course_id}/assets/{asset_name}
pub async fn delete_asset(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path((course_id, asset_name)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let course = parse_course_key(&course_id)?;
    let key = course.make_asset_key(ASSET_CATEGORY, &asset_name);
    service::delete_asset(state.stores.content.as_ref(), &key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// An explicit `format` wins; otherwise HTML only when `Accept` names it.
fn wants_html(format: Option<&str>, headers: &HeaderMap) -> bool {
    match format.map(str::trim) {
        Some(f) if f.eq_ignore_ascii_case("html") => true,
        Some(f) if f.eq_ignore_ascii_case("json") => false,
        _ => headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains("text/html")),
    }
}
