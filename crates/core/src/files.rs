//! Upload storage helpers.
//!
//! [`store_uploaded_file`] checks an upload against an extension allow-list
//! and a size limit, saves it to the content store, and runs an optional
//! validator over the stored bytes. A failing validator removes the stored
//! file before its error is returned.

use chrono::Utc;

use crate::assets::content::{extension, resolve_content_type, AssetRecord, StaticContent};
use crate::assets::key::{AssetKey, CourseKey, ASSET_CATEGORY};
use crate::error::CoreError;
use crate::store::ContentStore;
use crate::types::Timestamp;

/// Default upload limit for [`store_uploaded_file`] (2 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 2_000_000;

/// Timestamp suffix format for generated file names.
const FILENAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// A file received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Raised by a validator that rejects the stored file's contents.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FileValidationError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{0}")]
    MissingUpload(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error(transparent)]
    Validation(#[from] FileValidationError),

    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Post-storage content check.
pub type Validator<'a> = &'a (dyn Fn(&StaticContent) -> Result<(), FileValidationError> + Send + Sync);

/// Where a file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub key: AssetKey,
    pub file_name: String,
}

/// Validate and store an upload as `{base_name}{.ext}` in the course namespace.
///
/// `allowed_extensions` are lower-case and include the dot, e.g. `[".csv"]`.
/// The upload's own extension is matched case-insensitively. Without
/// `max_file_size` the limit is [`DEFAULT_MAX_FILE_SIZE`].
#[allow(clippy::too_many_arguments)]
pub async fn store_uploaded_file(
    store: &dyn ContentStore,
    course: &CourseKey,
    upload: Option<UploadedFile>,
    file_key: &str,
    allowed_extensions: &[&str],
    base_name: &str,
    max_file_size: Option<u64>,
    validator: Option<Validator<'_>>,
) -> Result<StoredFile, FileError> {
    let max_file_size = max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE);
    let upload = upload.ok_or_else(|| {
        FileError::MissingUpload(format!("No file uploaded with key '{file_key}'."))
    })?;

    let file_extension = extension(&upload.file_name)
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    if !allowed_extensions.contains(&file_extension.as_str()) {
        let file_types = allowed_extensions.join("', '");
        let msg = if allowed_extensions.len() == 1 {
            format!("The file must end with the extension '{file_types}'.")
        } else {
            format!("The file must end with one of the following extensions: '{file_types}'.")
        };
        return Err(FileError::PermissionDenied(msg));
    }

    if upload.size() > max_file_size {
        return Err(FileError::PermissionDenied(format!(
            "Maximum upload file size is {max_file_size} bytes."
        )));
    }

    let stored_file_name = format!("{base_name}{file_extension}");
    let content = build_content(course, &stored_file_name, upload, Utc::now());
    let key = content.key().clone();
    save_and_validate(store, content, validator).await?;

    Ok(StoredFile {
        key,
        file_name: stored_file_name,
    })
}

/// Assemble a [`StaticContent`] for an upload stored as `file_name`.
pub fn build_content(
    course: &CourseKey,
    file_name: &str,
    upload: UploadedFile,
    upload_date: Timestamp,
) -> StaticContent {
    let content_type = resolve_content_type(file_name, upload.content_type.as_deref());
    StaticContent {
        record: AssetRecord {
            course_key: course.clone(),
            key: course.make_asset_key(ASSET_CATEGORY, file_name),
            display_name: file_name.to_string(),
            content_type,
            length: upload.size(),
            upload_date,
            thumbnail: None,
            locked: false,
        },
        data: upload.data,
    }
}

/// Save `content`, then run `validator` against it. A failing validator
/// deletes the stored content before its error propagates.
pub async fn save_and_validate(
    store: &dyn ContentStore,
    content: StaticContent,
    validator: Option<Validator<'_>>,
) -> Result<(), FileError> {
    let Some(validator) = validator else {
        store.save(content).await?;
        return Ok(());
    };

    let key = content.key().clone();
    store.save(content.clone()).await?;
    if let Err(err) = validator(&content) {
        tracing::warn!(asset = %key, error = %err, "Stored file failed validation, removing");
        store.delete(&key).await?;
        return Err(err.into());
    }
    Ok(())
}

/// `{course}_{base_name}_{timestamp}` without an extension.
///
/// The course id has `/` replaced by `_` and is percent-encoded; the base
/// name is reduced to a valid file name.
pub fn course_and_time_based_filename(
    course: &CourseKey,
    base_name: &str,
    now: Timestamp,
) -> String {
    format!(
        "{}_{}_{}",
        quote(&course.to_string().replace('/', "_")),
        valid_filename(base_name),
        now.format(FILENAME_TIMESTAMP_FORMAT)
    )
}

/// Trim, turn spaces into underscores, and drop everything that is not
/// alphanumeric, `-`, `_`, or `.`.
pub fn valid_filename(name: &str) -> String {
    name.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

/// Percent-encode everything outside the URL-safe set.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-' | b'~' | b'/') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;
    use crate::store::memory::MemoryContentStore;

    fn course() -> CourseKey {
        CourseKey::new("org", "class", "run").unwrap()
    }

    fn upload(name: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: None,
            data: vec![b'x'; size],
        }
    }

    #[tokio::test]
    async fn missing_upload_is_rejected() {
        let store = MemoryContentStore::default();
        let result = store_uploaded_file(
            &store, &course(), None, "uploaded-file", &[".csv"], "base", Some(100), None,
        )
        .await;
        assert_matches!(result, Err(FileError::MissingUpload(msg)) if msg.contains("uploaded-file"));
    }

    #[tokio::test]
    async fn wrong_extension_lists_allowed_types() {
        let store = MemoryContentStore::default();
        let result = store_uploaded_file(
            &store,
            &course(),
            Some(upload("data.txt", 1)),
            "file",
            &[".csv", ".tsv"],
            "base",
            Some(100),
            None,
        )
        .await;
        assert_matches!(
            result,
            Err(FileError::PermissionDenied(msg))
                if msg == "The file must end with one of the following extensions: '.csv', '.tsv'."
        );
    }

    #[tokio::test]
    async fn extension_match_ignores_case() {
        let store = MemoryContentStore::default();
        let stored = store_uploaded_file(
            &store,
            &course(),
            Some(upload("DATA.CSV", 1)),
            "file",
            &[".csv"],
            "cohorts",
            Some(100),
            None,
        )
        .await
        .unwrap();
        assert_eq!(stored.file_name, "cohorts.csv");
        assert!(store.find(&stored.key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn oversize_is_rejected() {
        let store = MemoryContentStore::default();
        let result = store_uploaded_file(
            &store,
            &course(),
            Some(upload("data.csv", 11)),
            "file",
            &[".csv"],
            "base",
            Some(10),
            None,
        )
        .await;
        assert_matches!(
            result,
            Err(FileError::PermissionDenied(msg)) if msg == "Maximum upload file size is 10 bytes."
        );
    }

    #[tokio::test]
    async fn failed_validation_removes_stored_file() {
        let store = MemoryContentStore::default();
        let reject: Validator<'_> = &|_: &StaticContent| Err(FileValidationError("bad header".into()));
        let result = store_uploaded_file(
            &store,
            &course(),
            Some(upload("data.csv", 5)),
            "file",
            &[".csv"],
            "base",
            Some(100),
            Some(reject),
        )
        .await;
        assert_matches!(result, Err(FileError::Validation(e)) if e.0 == "bad header");
        assert!(store.list_course(&course()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn passing_validation_keeps_file() {
        let store = MemoryContentStore::default();
        let accept: Validator<'_> = &|c: &StaticContent| {
            if c.data.is_empty() {
                Err(FileValidationError("empty".into()))
            } else {
                Ok(())
            }
        };
        store_uploaded_file(
            &store,
            &course(),
            Some(upload("data.csv", 5)),
            "file",
            &[".csv"],
            "base",
            Some(100),
            Some(accept),
        )
        .await
        .unwrap();
        assert_eq!(store.list_course(&course()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn default_limit_applies_without_explicit_max() {
        let store = MemoryContentStore::default();
        let at_limit = DEFAULT_MAX_FILE_SIZE as usize;

        store_uploaded_file(
            &store,
            &course(),
            Some(upload("roster.csv", at_limit)),
            "file",
            &[".csv"],
            "roster",
            None,
            None,
        )
        .await
        .unwrap();

        let result = store_uploaded_file(
            &store,
            &course(),
            Some(upload("roster.csv", at_limit + 1)),
            "file",
            &[".csv"],
            "roster",
            None,
            None,
        )
        .await;
        assert_matches!(
            result,
            Err(FileError::PermissionDenied(msg))
                if msg == "Maximum upload file size is 2000000 bytes."
        );
    }

    #[test]
    fn filename_generator() {
        let now = Utc.with_ymd_and_hms(2014, 3, 9, 7, 5, 42).unwrap();
        let name = course_and_time_based_filename(&course(), "  grade report!.csv ", now);
        assert_eq!(name, "org_class_run_grade_report.csv_2014-03-09-070542");
    }

    #[test]
    fn quote_escapes_unsafe_bytes() {
        assert_eq!(quote("a b+c"), "a%20b%2Bc");
    }
}
