//! Store implementations on PostgreSQL.

mod asset_content_repo;
mod asset_metadata_repo;
mod course_repo;
mod enrollment_repo;

pub use asset_content_repo::AssetContentRepo;
pub use asset_metadata_repo::AssetMetadataRepo;
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;

use courseware_core::error::CoreError;

/// Map a driver error onto the domain storage error.
pub(crate) fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}
