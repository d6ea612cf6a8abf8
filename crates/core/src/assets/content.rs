//! Stored asset records and content-type resolution.

use serde::{Deserialize, Serialize};

use super::key::{AssetKey, CourseKey};
use crate::types::Timestamp;

/// Content type used when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extensions whose content type is forced regardless of what the uploader
/// or stored metadata declared.
const CONTENT_TYPE_OVERRIDES: &[(&str, &str)] = &[("pdf", "application/pdf")];

/// Metadata of a stored asset, without its bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub course_key: CourseKey,
    pub key: AssetKey,
    pub display_name: String,
    pub content_type: String,
    pub length: u64,
    pub upload_date: Timestamp,
    pub thumbnail: Option<AssetKey>,
    pub locked: bool,
}

/// An asset together with its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticContent {
    pub record: AssetRecord,
    pub data: Vec<u8>,
}

impl StaticContent {
    pub fn key(&self) -> &AssetKey {
        &self.record.key
    }
}

/// Asset metadata as recorded by the module store.
///
/// The module store does not hold asset metadata yet; see
/// [`CoreError::AlternateStoreMetadata`](crate::error::CoreError::AlternateStoreMetadata).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub key: AssetKey,
    pub internal_name: Option<String>,
    pub basename: Option<String>,
    pub locked: bool,
    pub curr_version: Option<String>,
    pub prev_version: Option<String>,
    pub edited_by: Option<i64>,
}

/// Lower-cased extension of a file name, without the dot.
pub fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Guess a content type from the file extension.
pub fn content_type_for_extension(file_name: &str) -> &'static str {
    let Some(ext) = extension(file_name) else {
        return DEFAULT_CONTENT_TYPE;
    };
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "zip" => "application/zip",
        "srt" => "application/x-subrip",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Resolve the content type to store for a file.
///
/// Overridden extensions always win. Otherwise a non-empty declared type is
/// kept, falling back to the extension guess.
pub fn resolve_content_type(file_name: &str, declared: Option<&str>) -> String {
    if let Some(ext) = extension(file_name) {
        if let Some((_, forced)) = CONTENT_TYPE_OVERRIDES.iter().find(|(e, _)| *e == ext) {
            return (*forced).to_string();
        }
    }
    match declared.map(str::trim) {
        Some(declared) if !declared.is_empty() => declared.to_string(),
        _ => content_type_for_extension(file_name).to_string(),
    }
}
