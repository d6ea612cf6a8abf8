//! Query parameter types for API handlers.

use courseware_core::assets::filter::TypeFilter;
use courseware_core::assets::listing::{AssetQuery, SortDirection, SortKey};
use serde::Deserialize;

/// `?page=&page_size=&sort=&direction=&asset_type=&format=` on the asset listing.
#[derive(Debug, Default, Deserialize)]
pub struct AssetListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub asset_type: Option<String>,
    /// `json` or `html`; overrides the `Accept` header.
    pub format: Option<String>,
}

impl AssetListParams {
    /// Resolve into a listing query, falling back to `default_page_size`.
    pub fn to_query(&self, default_page_size: i64) -> AssetQuery {
        AssetQuery {
            page: self.page.unwrap_or(0),
            page_size: self.page_size.unwrap_or(default_page_size),
            sort: SortKey::parse(self.sort.as_deref()),
            direction: SortDirection::parse(self.direction.as_deref()),
            filter: TypeFilter::parse(self.asset_type.as_deref()),
        }
    }
}
