#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use courseware_core::assets::content::{AssetRecord, StaticContent};
use courseware_core::assets::key::{CourseKey, ASSET_CATEGORY};
use courseware_core::course::gate::FeatureFlags;
use courseware_core::roles::{ROLE_STAFF, ROLE_STUDENT};
use courseware_core::store::Stores;
use http_body_util::BodyExt;
use tower::ServiceExt;

use courseware_api::auth::jwt::{generate_access_token, JwtConfig};
use courseware_api::config::ServerConfig;
use courseware_api::router::build_app_router;
use courseware_api::state::AppState;

/// Upload limit used by the test server.
pub const MAX_UPLOAD_BYTES: u64 = 1_000;

pub const LMS_BASE: &str = "lms_base_url";

const MULTIPART_BOUNDARY: &str = "courseware-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        lms_base: LMS_BASE.to_string(),
        max_upload_bytes: MAX_UPLOAD_BYTES,
        asset_page_size: 50,
        features: FeatureFlags::default(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `stores` with default features.
pub fn build_test_app(stores: Stores) -> Router {
    build_test_app_with(stores, FeatureFlags::default())
}

/// Build the full application router with the given feature flags.
///
/// Uses the same middleware stack as production via `build_app_router`.
pub fn build_test_app_with(stores: Stores, features: FeatureFlags) -> Router {
    let mut config = test_config();
    config.features = features;
    let state = AppState::new(stores, config.clone(), None);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token(user_id: i64, email: &str, role: &str) -> String {
    generate_access_token(user_id, email, role, &test_config().jwt).unwrap()
}

pub fn staff_token() -> String {
    token(1, "staff@example.com", ROLE_STAFF)
}

pub fn student_token(user_id: i64) -> String {
    token(user_id, &format!("student{user_id}@example.com"), ROLE_STUDENT)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn course() -> CourseKey {
    CourseKey::new("org", "class", "run").unwrap()
}

/// Store an asset directly, uploaded on day `day` of June 2013 at 10:30 UTC.
pub async fn seed_asset(stores: &Stores, course: &CourseKey, name: &str, day: u32) -> StaticContent {
    let content = StaticContent {
        record: AssetRecord {
            course_key: course.clone(),
            key: course.make_asset_key(ASSET_CATEGORY, name),
            display_name: name.to_string(),
            content_type: "text/plain".to_string(),
            length: 5,
            upload_date: Utc.with_ymd_and_hms(2013, 6, day, 10, 30, 0).unwrap(),
            thumbnail: None,
            locked: false,
        },
        data: b"hello".to_vec(),
    };
    stores.content.save(content.clone()).await.unwrap();
    content
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send_json(app, Method::POST, uri, token, body).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, Some(token), body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(
        app,
        request(method, uri, token)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// POST a multipart form with a single file field.
pub async fn post_file(
    app: Router,
    uri: &str,
    token: &str,
    field: &str,
    file_name: &str,
    data: &[u8],
) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
