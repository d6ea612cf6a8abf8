//! PostgreSQL persistence for the courseware stores.

pub mod models;
pub mod repositories;

use std::sync::Arc;

use courseware_core::store::Stores;
use sqlx::postgres::PgPoolOptions;

use crate::repositories::{AssetContentRepo, AssetMetadataRepo, CourseRepo, EnrollmentRepo};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify connectivity.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// All stores backed by `pool`.
pub fn stores(pool: &DbPool) -> Stores {
    Stores {
        content: Arc::new(AssetContentRepo::new(pool.clone())),
        asset_metadata: Arc::new(AssetMetadataRepo::new(pool.clone())),
        courses: Arc::new(CourseRepo::new(pool.clone())),
        enrollments: Arc::new(EnrollmentRepo::new(pool.clone())),
    }
}
