//! Repository traits over course assets, course settings, and enrollments.
//!
//! Handlers and services only see these traits. `courseware-db` implements
//! them on PostgreSQL; [`memory`] implements them in process for tests and
//! local development.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::assets::content::{AssetMetadata, AssetRecord, StaticContent};
use crate::assets::key::{AssetKey, CourseKey};
use crate::course::settings::CourseSettings;
use crate::error::CoreError;
use crate::types::DbId;

/// Binary course assets.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find(&self, key: &AssetKey) -> Result<Option<StaticContent>, CoreError>;

    /// Insert or replace the content stored under its key. A replaced asset
    /// keeps its original position in course listings.
    async fn save(&self, content: StaticContent) -> Result<(), CoreError>;

    /// Returns `false` when nothing was stored under `key`.
    async fn delete(&self, key: &AssetKey) -> Result<bool, CoreError>;

    /// All asset records of a course, in insertion order.
    async fn list_course(&self, course: &CourseKey) -> Result<Vec<AssetRecord>, CoreError>;

    /// Persist the lock flag. Returns the updated record, or `None` when the
    /// asset does not exist.
    async fn set_locked(
        &self,
        key: &AssetKey,
        locked: bool,
    ) -> Result<Option<AssetRecord>, CoreError>;
}

/// Asset metadata held by the module store.
#[async_trait]
pub trait AssetMetadataStore: Send + Sync {
    async fn find(&self, key: &AssetKey) -> Result<Option<AssetMetadata>, CoreError>;

    async fn save(&self, metadata: AssetMetadata) -> Result<(), CoreError>;

    async fn delete(&self, key: &AssetKey) -> Result<bool, CoreError>;
}

/// Course settings relevant to the about page and enrollment.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn find(&self, key: &CourseKey) -> Result<Option<CourseSettings>, CoreError>;

    async fn save(&self, settings: CourseSettings) -> Result<(), CoreError>;

    async fn delete(&self, key: &CourseKey) -> Result<bool, CoreError>;
}

/// Enrollments, the invitation allow-list, and shopping carts.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn is_enrolled(&self, course: &CourseKey, user_id: DbId) -> Result<bool, CoreError>;

    async fn enrollment_count(&self, course: &CourseKey) -> Result<u64, CoreError>;

    /// Idempotent.
    async fn enroll(&self, course: &CourseKey, user_id: DbId) -> Result<(), CoreError>;

    /// Emails compare case-insensitively.
    async fn is_allowed(&self, course: &CourseKey, email: &str) -> Result<bool, CoreError>;

    async fn allow(&self, course: &CourseKey, email: &str) -> Result<(), CoreError>;

    async fn in_cart(&self, course: &CourseKey, user_id: DbId) -> Result<bool, CoreError>;

    async fn add_to_cart(&self, course: &CourseKey, user_id: DbId) -> Result<(), CoreError>;
}

/// The full set of injected stores, cheap to clone.
#[derive(Clone)]
pub struct Stores {
    pub content: Arc<dyn ContentStore>,
    pub asset_metadata: Arc<dyn AssetMetadataStore>,
    pub courses: Arc<dyn CourseStore>,
    pub enrollments: Arc<dyn EnrollmentStore>,
}

impl Stores {
    /// Fresh, empty in-process stores.
    pub fn in_memory() -> Self {
        Self {
            content: Arc::new(memory::MemoryContentStore::default()),
            asset_metadata: Arc::new(memory::MemoryAssetMetadataStore::default()),
            courses: Arc::new(memory::MemoryCourseStore::default()),
            enrollments: Arc::new(memory::MemoryEnrollmentStore::default()),
        }
    }
}
