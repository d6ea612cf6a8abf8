//! Role gates for studio and learner routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use courseware_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Course staff only: asset management in the studio.
///
/// 401 without a valid token, 403 for any other role.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await? {
            user if user.is_staff() => Ok(RequireStaff(user)),
            user => {
                tracing::debug!(user_id = user.user_id, role = %user.role, "Staff route refused");
                Err(CoreError::Forbidden("Staff role required".into()).into())
            }
        }
    }
}

/// Any signed-in user, e.g. a learner enrolling in a course.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state)
            .await
            .map(RequireAuth)
    }
}
