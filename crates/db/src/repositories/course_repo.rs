//! Repository for the `courses` table.

use async_trait::async_trait;
use courseware_core::assets::key::CourseKey;
use courseware_core::course::settings::CourseSettings;
use courseware_core::error::CoreError;
use courseware_core::store::CourseStore;
use sqlx::PgPool;

use super::storage_error;
use crate::models::course::CourseRow;

pub struct CourseRepo {
    pool: PgPool,
}

impl CourseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseStore for CourseRepo {
    async fn find(&self, key: &CourseKey) -> Result<Option<CourseSettings>, CoreError> {
        let row = sqlx::query_as::<_, CourseRow>(
            "SELECT id, course_key, settings FROM courses WHERE course_key = $1",
        )
        .bind(key.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        row.map(CourseSettings::try_from).transpose()
    }

    async fn save(&self, settings: CourseSettings) -> Result<(), CoreError> {
        let document = serde_json::to_value(&settings)
            .map_err(|e| CoreError::Internal(format!("Failed to encode course settings: {e}")))?;
        sqlx::query(
            "INSERT INTO courses (course_key, settings) VALUES ($1, $2) \
             ON CONFLICT (course_key) DO UPDATE SET \
                settings = EXCLUDED.settings, updated_at = NOW()",
        )
        .bind(settings.key.to_string())
        .bind(&document)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn delete(&self, key: &CourseKey) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE course_key = $1")
            .bind(key.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }
}
