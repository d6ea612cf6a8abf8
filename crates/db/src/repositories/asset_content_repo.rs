//! Repository for the `course_assets` table.

use async_trait::async_trait;
use courseware_core::assets::content::{AssetRecord, StaticContent};
use courseware_core::assets::key::{AssetKey, CourseKey};
use courseware_core::error::CoreError;
use courseware_core::store::ContentStore;
use sqlx::PgPool;

use super::storage_error;
use crate::models::asset::{AssetContentRow, AssetRecordRow};

/// Column list for record-only queries.
const RECORD_COLUMNS: &str = "\
    id, asset_path, course_key, display_name, content_type, \
    length, upload_date, thumbnail_path, locked";

pub struct AssetContentRepo {
    pool: PgPool,
}

impl AssetContentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for AssetContentRepo {
    async fn find(&self, key: &AssetKey) -> Result<Option<StaticContent>, CoreError> {
        let query =
            format!("SELECT {RECORD_COLUMNS}, data FROM course_assets WHERE asset_path = $1");
        let row = sqlx::query_as::<_, AssetContentRow>(&query)
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        row.map(StaticContent::try_from).transpose()
    }

    /// Upsert on `asset_path`. The row id, and so the listing position, is kept;
    /// the owning course is the one that saved last.
    async fn save(&self, content: StaticContent) -> Result<(), CoreError> {
        let record = &content.record;
        sqlx::query(
            "INSERT INTO course_assets (\
                asset_path, course_key, display_name, content_type, \
                length, upload_date, thumbnail_path, locked, data\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (asset_path) DO UPDATE SET \
                course_key = EXCLUDED.course_key, \
                display_name = EXCLUDED.display_name, \
                content_type = EXCLUDED.content_type, \
                length = EXCLUDED.length, \
                upload_date = EXCLUDED.upload_date, \
                thumbnail_path = EXCLUDED.thumbnail_path, \
                locked = EXCLUDED.locked, \
                data = EXCLUDED.data, \
                updated_at = NOW()",
        )
        .bind(record.key.to_string())
        .bind(record.course_key.to_string())
        .bind(&record.display_name)
        .bind(&record.content_type)
        .bind(i64::try_from(record.length).unwrap_or(i64::MAX))
        .bind(record.upload_date)
        .bind(record.thumbnail.as_ref().map(|t| t.to_string()))
        .bind(record.locked)
        .bind(&content.data)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn delete(&self, key: &AssetKey) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM course_assets WHERE asset_path = $1")
            .bind(key.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_course(&self, course: &CourseKey) -> Result<Vec<AssetRecord>, CoreError> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM course_assets WHERE course_key = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, AssetRecordRow>(&query)
            .bind(course.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        rows.into_iter().map(AssetRecord::try_from).collect()
    }

    async fn set_locked(
        &self,
        key: &AssetKey,
        locked: bool,
    ) -> Result<Option<AssetRecord>, CoreError> {
        let query = format!(
            "UPDATE course_assets SET locked = $2, updated_at = NOW() \
             WHERE asset_path = $1 \
             RETURNING {RECORD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AssetRecordRow>(&query)
            .bind(key.to_string())
            .bind(locked)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        row.map(AssetRecord::try_from).transpose()
    }
}
