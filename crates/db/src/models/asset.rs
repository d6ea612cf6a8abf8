//! Rows of the `course_assets` table.

use courseware_core::assets::content::{AssetRecord, StaticContent};
use courseware_core::assets::key::{AssetKey, CourseKey};
use courseware_core::error::CoreError;
use courseware_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A `course_assets` row without its bytes.
#[derive(Debug, Clone, FromRow)]
pub struct AssetRecordRow {
    pub id: DbId,
    pub asset_path: String,
    pub course_key: String,
    pub display_name: String,
    pub content_type: String,
    pub length: i64,
    pub upload_date: Timestamp,
    pub thumbnail_path: Option<String>,
    pub locked: bool,
}

/// A full `course_assets` row.
#[derive(Debug, Clone, FromRow)]
pub struct AssetContentRow {
    #[sqlx(flatten)]
    pub record: AssetRecordRow,
    pub data: Vec<u8>,
}

impl TryFrom<AssetRecordRow> for AssetRecord {
    type Error = CoreError;

    fn try_from(row: AssetRecordRow) -> Result<Self, Self::Error> {
        Ok(AssetRecord {
            course_key: parse_course_key(&row.course_key)?,
            key: parse_asset_key(&row.asset_path)?,
            display_name: row.display_name,
            content_type: row.content_type,
            length: u64::try_from(row.length).unwrap_or_default(),
            upload_date: row.upload_date,
            thumbnail: row
                .thumbnail_path
                .as_deref()
                .map(parse_asset_key)
                .transpose()?,
            locked: row.locked,
        })
    }
}

impl TryFrom<AssetContentRow> for StaticContent {
    type Error = CoreError;

    fn try_from(row: AssetContentRow) -> Result<Self, Self::Error> {
        Ok(StaticContent {
            record: row.record.try_into()?,
            data: row.data,
        })
    }
}

pub(crate) fn parse_asset_key(raw: &str) -> Result<AssetKey, CoreError> {
    raw.parse()
        .map_err(|e| CoreError::Storage(format!("Corrupt asset path in database: {e}")))
}

pub(crate) fn parse_course_key(raw: &str) -> Result<CourseKey, CoreError> {
    raw.parse()
        .map_err(|e| CoreError::Storage(format!("Corrupt course key in database: {e}")))
}
