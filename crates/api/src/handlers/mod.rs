pub mod about;
pub mod assets;
pub mod content;
pub mod enrollment;

use courseware_core::assets::key::CourseKey;
use courseware_core::error::CoreError;

use crate::error::AppResult;

/// Parse a `{course_id}` path segment in either key form.
pub(crate) fn parse_course_key(raw: &str) -> AppResult<CourseKey> {
    raw.parse::<CourseKey>()
        .map_err(|e| CoreError::from(e).into())
}

/// A course id that does not parse names no course.
pub(crate) fn course_not_found(raw: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Course",
        id: raw.to_string(),
    }
}
