//! About page and enrollment over the injected stores.

use super::gate::{
    courseware_url, evaluate, AboutDecision, FeatureFlags, GateContext, Registration, Viewer,
    ViewerIdentity, ViewerStatus, RESTRICTED_DOMAIN_NOTICE,
};
use super::settings::CourseSettings;
use crate::assets::key::CourseKey;
use crate::error::CoreError;
use crate::store::Stores;
use crate::types::Timestamp;

/// Decide what the about page of `course_key` shows to `viewer`.
pub async fn about_page(
    stores: &Stores,
    course_key: &CourseKey,
    viewer: &Viewer,
    features: &FeatureFlags,
    now: Timestamp,
) -> Result<AboutDecision, CoreError> {
    let course = find_course(stores, course_key).await?;
    decide(stores, &course, viewer, features, now).await
}

/// Enroll the viewer if the about page would offer free registration and
/// return the courseware URL.
///
/// Enrolling twice is a no-op. Every other gate outcome is refused with the
/// notice the about page shows.
pub async fn enroll(
    stores: &Stores,
    course_key: &CourseKey,
    viewer: &ViewerIdentity,
    features: &FeatureFlags,
    now: Timestamp,
) -> Result<String, CoreError> {
    let course = find_course(stores, course_key).await?;

    // The marketing redirect only applies to the page itself.
    let features = FeatureFlags {
        marketing_site: false,
        ..*features
    };
    let page = match decide(stores, &course, &Viewer::User(viewer.clone()), &features, now).await? {
        AboutDecision::Render(page) => page,
        AboutDecision::NotFound | AboutDecision::Redirect(_) => {
            return Err(course_not_found(course_key))
        }
    };

    if page.restricted_domain_notice.is_some() {
        return Err(CoreError::Forbidden(RESTRICTED_DOMAIN_NOTICE.to_string()));
    }

    match page.registration {
        Registration::Register { .. } => {
            stores.enrollments.enroll(course_key, viewer.user_id).await?;
            tracing::info!(course = %course_key, user_id = viewer.user_id, "User enrolled");
            Ok(courseware_url(course_key))
        }
        Registration::AlreadyRegistered { courseware_url } => Ok(courseware_url),
        Registration::AddToCart { .. } => Err(CoreError::Validation(
            "This course requires payment; add it to your cart instead".to_string(),
        )),
        other => Err(CoreError::Validation(other.message())),
    }
}

async fn decide(
    stores: &Stores,
    course: &CourseSettings,
    viewer: &Viewer,
    features: &FeatureFlags,
    now: Timestamp,
) -> Result<AboutDecision, CoreError> {
    let status = viewer_status(stores, &course.key, viewer).await?;
    let enrollment_count = match course.max_student_enrollments_allowed {
        Some(_) => stores.enrollments.enrollment_count(&course.key).await?,
        None => 0,
    };

    let decision = evaluate(&GateContext {
        course,
        viewer,
        status,
        enrollment_count,
        features,
        now,
    });
    tracing::debug!(course = %course.key, ?status, enrollment_count, "About page evaluated");
    Ok(decision)
}

/// Look up the viewer's enrollment, allow-list, and cart state.
pub async fn viewer_status(
    stores: &Stores,
    course: &CourseKey,
    viewer: &Viewer,
) -> Result<ViewerStatus, CoreError> {
    let Some(identity) = viewer.identity() else {
        return Ok(ViewerStatus::default());
    };

    Ok(ViewerStatus {
        enrolled: stores
            .enrollments
            .is_enrolled(course, identity.user_id)
            .await?,
        allowed: stores.enrollments.is_allowed(course, &identity.email).await?,
        in_cart: stores.enrollments.in_cart(course, identity.user_id).await?,
    })
}

async fn find_course(stores: &Stores, key: &CourseKey) -> Result<CourseSettings, CoreError> {
    stores
        .courses
        .find(key)
        .await?
        .ok_or_else(|| course_not_found(key))
}

fn course_not_found(key: &CourseKey) -> CoreError {
    CoreError::NotFound {
        entity: "Course",
        id: key.to_string(),
    }
}
