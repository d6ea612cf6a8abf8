use std::sync::Arc;

use courseware_core::assets::filter::AssetCategories;
use courseware_core::store::Stores;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Asset, course, and enrollment stores.
    pub stores: Stores,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database pool when running on PostgreSQL; `None` for in-memory stores.
    pub pool: Option<courseware_db::DbPool>,
    /// Asset type filter categories.
    pub categories: Arc<AssetCategories>,
}

impl AppState {
    pub fn new(stores: Stores, config: ServerConfig, pool: Option<courseware_db::DbPool>) -> Self {
        Self {
            stores,
            config: Arc::new(config),
            pool,
            categories: Arc::new(AssetCategories::default()),
        }
    }
}
