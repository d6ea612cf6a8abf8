//! Course asset ("Files & Uploads") business logic.
//!
//! Keys and locations, content-type resolution, type filters, the listing
//! query, client serialization, and the async services that drive a
//! [`ContentStore`](crate::store::ContentStore).

pub mod content;
pub mod filter;
pub mod json;
pub mod key;
pub mod listing;
pub mod service;

use crate::error::CoreError;

/// Asset-domain error type for key parsing.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Invalid course key: '{0}'")]
    InvalidCourseKey(String),

    #[error("Invalid asset key: '{0}'")]
    InvalidAssetKey(String),
}

impl From<AssetError> for CoreError {
    fn from(err: AssetError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
