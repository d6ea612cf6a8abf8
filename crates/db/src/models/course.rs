//! Rows of the `courses` table.

use courseware_core::course::settings::CourseSettings;
use courseware_core::error::CoreError;
use courseware_core::types::DbId;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: DbId,
    pub course_key: String,
    pub settings: serde_json::Value,
}

impl TryFrom<CourseRow> for CourseSettings {
    type Error = CoreError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        serde_json::from_value(row.settings).map_err(|e| {
            CoreError::Storage(format!(
                "Corrupt settings for course {}: {e}",
                row.course_key
            ))
        })
    }
}
