//! Client-facing JSON representation of an asset.

use serde::{Deserialize, Serialize};

use super::content::AssetRecord;
use super::key::AssetKey;
use crate::types::Timestamp;

/// `date_added` display format, e.g. `Jun 01, 2013 at 10:30 UTC`.
const DATE_ADDED_FORMAT: &str = "%b %d, %Y at %H:%M UTC";

/// Serialized asset as sent to the authoring UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetJson {
    pub display_name: String,
    pub date_added: String,
    pub url: String,
    pub external_url: String,
    pub portable_url: String,
    pub thumbnail: Option<String>,
    pub locked: bool,
    pub id: String,
}

pub fn format_date_added(upload_date: &Timestamp) -> String {
    upload_date.format(DATE_ADDED_FORMAT).to_string()
}

/// Build the client representation of an asset.
///
/// `lms_base` is prefixed verbatim to the asset URL to form `external_url`.
pub fn asset_json(
    display_name: &str,
    upload_date: &Timestamp,
    location: &AssetKey,
    thumbnail_location: Option<&AssetKey>,
    locked: bool,
    lms_base: &str,
) -> AssetJson {
    let url = location.path();
    AssetJson {
        display_name: display_name.to_string(),
        date_added: format_date_added(upload_date),
        external_url: format!("{lms_base}{url}"),
        portable_url: location.static_path(),
        thumbnail: thumbnail_location.map(AssetKey::path),
        locked,
        id: location.to_string(),
        url,
    }
}

impl AssetRecord {
    pub fn to_json(&self, lms_base: &str) -> AssetJson {
        asset_json(
            &self.display_name,
            &self.upload_date,
            &self.key,
            self.thumbnail.as_ref(),
            self.locked,
            lms_base,
        )
    }
}
