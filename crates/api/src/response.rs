//! Shared response body types for API handlers.

use courseware_core::assets::json::AssetJson;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of the asset listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListResponse {
    pub start: usize,
    pub end: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub assets: Vec<AssetJson>,
    pub sort: &'static str,
}

/// Body of a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub asset: AssetJson,
    pub msg: &'static str,
}
