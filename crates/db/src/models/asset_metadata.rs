//! Rows of the `asset_metadata` table.

use courseware_core::assets::content::AssetMetadata;
use courseware_core::error::CoreError;
use courseware_core::types::DbId;
use sqlx::FromRow;

use super::asset::parse_asset_key;

#[derive(Debug, Clone, FromRow)]
pub struct AssetMetadataRow {
    pub id: DbId,
    pub asset_path: String,
    pub internal_name: Option<String>,
    pub basename: Option<String>,
    pub locked: bool,
    pub curr_version: Option<String>,
    pub prev_version: Option<String>,
    pub edited_by: Option<DbId>,
}

impl TryFrom<AssetMetadataRow> for AssetMetadata {
    type Error = CoreError;

    fn try_from(row: AssetMetadataRow) -> Result<Self, Self::Error> {
        Ok(AssetMetadata {
            key: parse_asset_key(&row.asset_path)?,
            internal_name: row.internal_name,
            basename: row.basename,
            locked: row.locked,
            curr_version: row.curr_version,
            prev_version: row.prev_version,
            edited_by: row.edited_by,
        })
    }
}
