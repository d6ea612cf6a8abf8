//! Repository for the `asset_metadata` table.

use async_trait::async_trait;
use courseware_core::assets::content::AssetMetadata;
use courseware_core::assets::key::AssetKey;
use courseware_core::error::CoreError;
use courseware_core::store::AssetMetadataStore;
use sqlx::PgPool;

use super::storage_error;
use crate::models::asset_metadata::AssetMetadataRow;

const COLUMNS: &str = "\
    id, asset_path, internal_name, basename, locked, \
    curr_version, prev_version, edited_by";

pub struct AssetMetadataRepo {
    pool: PgPool,
}

impl AssetMetadataRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetMetadataStore for AssetMetadataRepo {
    async fn find(&self, key: &AssetKey) -> Result<Option<AssetMetadata>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM asset_metadata WHERE asset_path = $1");
        let row = sqlx::query_as::<_, AssetMetadataRow>(&query)
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        row.map(AssetMetadata::try_from).transpose()
    }

    async fn save(&self, metadata: AssetMetadata) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO asset_metadata (\
                asset_path, internal_name, basename, locked, \
                curr_version, prev_version, edited_by\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (asset_path) DO UPDATE SET \
                internal_name = EXCLUDED.internal_name, \
                basename = EXCLUDED.basename, \
                locked = EXCLUDED.locked, \
                curr_version = EXCLUDED.curr_version, \
                prev_version = EXCLUDED.prev_version, \
                edited_by = EXCLUDED.edited_by, \
                updated_at = NOW()",
        )
        .bind(metadata.key.to_string())
        .bind(metadata.internal_name.as_deref())
        .bind(metadata.basename.as_deref())
        .bind(metadata.locked)
        .bind(metadata.curr_version.as_deref())
        .bind(metadata.prev_version.as_deref())
        .bind(metadata.edited_by)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn delete(&self, key: &AssetKey) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM asset_metadata WHERE asset_path = $1")
            .bind(key.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }
}
