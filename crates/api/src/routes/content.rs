use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// GET /c4x/{org}/{course}/{category}/{name} -> serve_asset
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/c4x/{org}/{course}/{category}/{name}",
        get(content::serve_asset),
    )
}
