//! Asset operations over the injected stores.

use chrono::Utc;

use super::content::{AssetRecord, StaticContent};
use super::filter::AssetCategories;
use super::key::{AssetKey, CourseKey};
use super::listing::{list_assets, AssetPage, AssetQuery};
use crate::error::CoreError;
use crate::files::{build_content, save_and_validate, UploadedFile, Validator};
use crate::store::{AssetMetadataStore, ContentStore};

/// Load a course's assets and return the requested page.
pub async fn list_course_assets(
    store: &dyn ContentStore,
    course: &CourseKey,
    query: &AssetQuery,
    categories: &AssetCategories,
) -> Result<AssetPage, CoreError> {
    let records = store.list_course(course).await?;
    Ok(list_assets(records, query, categories))
}

/// Store an uploaded file as a course asset.
///
/// An upload of exactly `max_size` bytes is accepted. The asset is named
/// after the uploaded file; uploading the same name again replaces it.
pub async fn upload_asset(
    store: &dyn ContentStore,
    course: &CourseKey,
    upload: Option<UploadedFile>,
    max_size: u64,
    validator: Option<Validator<'_>>,
) -> Result<AssetRecord, CoreError> {
    let upload = upload.ok_or_else(|| {
        CoreError::Validation("No file uploaded with key 'file'.".to_string())
    })?;

    if upload.size() > max_size {
        return Err(CoreError::PayloadTooLarge(format!(
            "File {} exceeds the maximum size of {max_size} bytes",
            upload.file_name
        )));
    }

    let file_name = upload.file_name.trim().to_string();
    if file_name.is_empty() || file_name.contains('/') {
        return Err(CoreError::Validation(format!(
            "Invalid file name '{}'",
            upload.file_name
        )));
    }

    let content = build_content(course, &file_name, upload, Utc::now());
    let record = content.record.clone();
    save_and_validate(store, content, validator).await?;

    tracing::info!(
        course = %course,
        asset = %record.key,
        length = record.length,
        content_type = %record.content_type,
        "Asset uploaded",
    );
    Ok(record)
}

/// Set the lock flag of an asset. Setting the current value again is a no-op.
pub async fn set_locked(
    store: &dyn ContentStore,
    key: &AssetKey,
    locked: bool,
) -> Result<AssetRecord, CoreError> {
    let record = store
        .set_locked(key, locked)
        .await?
        .ok_or_else(|| asset_not_found(key))?;

    tracing::info!(asset = %key, locked, "Asset lock updated");
    Ok(record)
}

/// Fetch an asset for download.
///
/// Metadata is looked up in the module store first. Nothing writes asset
/// metadata there yet, so a hit is reported as
/// [`CoreError::AlternateStoreMetadata`] instead of being served.
pub async fn fetch_asset(
    content: &dyn ContentStore,
    metadata: &dyn AssetMetadataStore,
    key: &AssetKey,
) -> Result<StaticContent, CoreError> {
    if metadata.find(key).await?.is_some() {
        tracing::error!(asset = %key, "Asset metadata found in module store");
        return Err(CoreError::AlternateStoreMetadata(key.to_string()));
    }

    content.find(key).await?.ok_or_else(|| asset_not_found(key))
}

/// Remove an asset.
pub async fn delete_asset(store: &dyn ContentStore, key: &AssetKey) -> Result<(), CoreError> {
    if !store.delete(key).await? {
        return Err(asset_not_found(key));
    }
    tracing::info!(asset = %key, "Asset deleted");
    Ok(())
}

fn asset_not_found(key: &AssetKey) -> CoreError {
    CoreError::NotFound {
        entity: "Asset",
        id: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::assets::content::AssetMetadata;
    use crate::assets::key::ASSET_CATEGORY;
    use crate::files::FileValidationError;
    use crate::store::memory::{MemoryAssetMetadataStore, MemoryContentStore};

    const MAX: u64 = 1_000;

    fn course() -> CourseKey {
        CourseKey::new("org", "class", "run").unwrap()
    }

    fn upload(name: &str, size: usize) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: name.to_string(),
            content_type: Some("text/plain".into()),
            data: vec![b'a'; size],
        })
    }

    #[tokio::test]
    async fn upload_size_boundaries() {
        let store = MemoryContentStore::default();
        assert!(upload_asset(&store, &course(), upload("small.file.test", 500), MAX, None)
            .await
            .is_ok());
        assert!(upload_asset(&store, &course(), upload("justequals.file.test", 1_000), MAX, None)
            .await
            .is_ok());
        assert_matches!(
            upload_asset(&store, &course(), upload("large.file.test", 1_090), MAX, None).await,
            Err(CoreError::PayloadTooLarge(_))
        );
        assert_eq!(store.list_course(&course()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn upload_without_file_is_validation_error() {
        let store = MemoryContentStore::default();
        assert_matches!(
            upload_asset(&store, &course(), None, MAX, None).await,
            Err(CoreError::Validation(_))
        );
    }

    #[tokio::test]
    async fn upload_records_metadata() {
        let store = MemoryContentStore::default();
        let record = upload_asset(&store, &course(), upload("asset-1.txt", 7), MAX, None)
            .await
            .unwrap();
        assert_eq!(record.key.to_string(), "/c4x/org/class/asset/asset-1.txt");
        assert_eq!(record.length, 7);
        assert_eq!(record.content_type, "text/plain");
        assert!(!record.locked);
    }

    #[tokio::test]
    async fn upload_validation_failure_cleans_up() {
        let store = MemoryContentStore::default();
        let reject: Validator<'_> = &|_: &StaticContent| Err(FileValidationError("nope".into()));
        assert_matches!(
            upload_asset(&store, &course(), upload("a.txt", 3), MAX, Some(reject)).await,
            Err(CoreError::Validation(msg)) if msg == "nope"
        );
        assert!(store.list_course(&course()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lock_round_trip() {
        let store = MemoryContentStore::default();
        let record = upload_asset(&store, &course(), upload("sample_static.txt", 3), MAX, None)
            .await
            .unwrap();
        let initial = record.locked;

        let locked = set_locked(&store, &record.key, true).await.unwrap();
        assert!(locked.locked);
        assert!(set_locked(&store, &record.key, true).await.unwrap().locked);

        let unlocked = set_locked(&store, &record.key, false).await.unwrap();
        assert!(!unlocked.locked);
        assert_eq!(unlocked.locked, initial);
    }

    #[tokio::test]
    async fn lock_unknown_asset_is_not_found() {
        let store = MemoryContentStore::default();
        let key = course().make_asset_key(ASSET_CATEGORY, "missing.txt");
        assert_matches!(
            set_locked(&store, &key, true).await,
            Err(CoreError::NotFound { entity: "Asset", .. })
        );
    }

    #[tokio::test]
    async fn fetch_prefers_module_store_error() {
        let content = MemoryContentStore::default();
        let metadata = MemoryAssetMetadataStore::default();
        let key = course().make_asset_key(ASSET_CATEGORY, "pic1.jpg");
        metadata
            .save(AssetMetadata {
                key: key.clone(),
                internal_name: Some("EKMND332DDBK".into()),
                basename: Some("pix/archive".into()),
                locked: false,
                curr_version: Some("14".into()),
                prev_version: Some("13".into()),
                edited_by: Some(15),
            })
            .await
            .unwrap();

        assert_matches!(
            fetch_asset(&content, &metadata, &key).await,
            Err(CoreError::AlternateStoreMetadata(id)) if id == key.to_string()
        );
    }

    #[tokio::test]
    async fn fetch_missing_is_not_found() {
        let content = MemoryContentStore::default();
        let metadata = MemoryAssetMetadataStore::default();
        let key = course().make_asset_key(ASSET_CATEGORY, "not_the_asset_name");
        assert_matches!(
            fetch_asset(&content, &metadata, &key).await,
            Err(CoreError::NotFound { .. })
        );
    }
}
