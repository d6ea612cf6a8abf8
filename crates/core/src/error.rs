use crate::files::FileError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Asset metadata was found in the module store instead of the content
    /// store. Metadata is not written there yet, so finding any is a bug.
    #[error("Asset metadata for {0} found in the module store")]
    AlternateStoreMetadata(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FileError> for CoreError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::MissingUpload(msg) => CoreError::Validation(msg),
            FileError::PermissionDenied(msg) => CoreError::Forbidden(msg),
            FileError::Validation(e) => CoreError::Validation(e.to_string()),
            FileError::Store(core) => core,
        }
    }
}
