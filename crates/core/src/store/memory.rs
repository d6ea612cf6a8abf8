//! In-process store implementations.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AssetMetadataStore, ContentStore, CourseStore, EnrollmentStore};
use crate::assets::content::{AssetMetadata, AssetRecord, StaticContent};
use crate::assets::key::{AssetKey, CourseKey};
use crate::course::settings::CourseSettings;
use crate::error::CoreError;
use crate::types::DbId;

/// Content kept in a vector so listings come back in insertion order.
#[derive(Default)]
pub struct MemoryContentStore {
    items: RwLock<Vec<StaticContent>>,
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find(&self, key: &AssetKey) -> Result<Option<StaticContent>, CoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|c| c.key() == key).cloned())
    }

    async fn save(&self, content: StaticContent) -> Result<(), CoreError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|c| c.key() == content.key()) {
            Some(existing) => *existing = content,
            None => items.push(content),
        }
        Ok(())
    }

    async fn delete(&self, key: &AssetKey) -> Result<bool, CoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|c| c.key() != key);
        Ok(items.len() != before)
    }

    async fn list_course(&self, course: &CourseKey) -> Result<Vec<AssetRecord>, CoreError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|c| &c.record.course_key == course)
            .map(|c| c.record.clone())
            .collect())
    }

    async fn set_locked(
        &self,
        key: &AssetKey,
        locked: bool,
    ) -> Result<Option<AssetRecord>, CoreError> {
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|c| c.key() == key).map(|c| {
            c.record.locked = locked;
            c.record.clone()
        }))
    }
}

#[derive(Default)]
pub struct MemoryAssetMetadataStore {
    items: RwLock<HashMap<AssetKey, AssetMetadata>>,
}

#[async_trait]
impl AssetMetadataStore for MemoryAssetMetadataStore {
    async fn find(&self, key: &AssetKey) -> Result<Option<AssetMetadata>, CoreError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn save(&self, metadata: AssetMetadata) -> Result<(), CoreError> {
        self.items
            .write()
            .await
            .insert(metadata.key.clone(), metadata);
        Ok(())
    }

    async fn delete(&self, key: &AssetKey) -> Result<bool, CoreError> {
        Ok(self.items.write().await.remove(key).is_some())
    }
}

#[derive(Default)]
pub struct MemoryCourseStore {
    items: RwLock<HashMap<CourseKey, CourseSettings>>,
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn find(&self, key: &CourseKey) -> Result<Option<CourseSettings>, CoreError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn save(&self, settings: CourseSettings) -> Result<(), CoreError> {
        self.items
            .write()
            .await
            .insert(settings.key.clone(), settings);
        Ok(())
    }

    async fn delete(&self, key: &CourseKey) -> Result<bool, CoreError> {
        Ok(self.items.write().await.remove(key).is_some())
    }
}

#[derive(Default)]
struct EnrollmentTables {
    enrolled: HashMap<CourseKey, HashSet<DbId>>,
    allowed: HashMap<CourseKey, HashSet<String>>,
    carts: HashSet<(CourseKey, DbId)>,
}

#[derive(Default)]
pub struct MemoryEnrollmentStore {
    tables: RwLock<EnrollmentTables>,
}

#[async_trait]
impl EnrollmentStore for MemoryEnrollmentStore {
    async fn is_enrolled(&self, course: &CourseKey, user_id: DbId) -> Result<bool, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrolled
            .get(course)
            .is_some_and(|users| users.contains(&user_id)))
    }

    async fn enrollment_count(&self, course: &CourseKey) -> Result<u64, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.enrolled.get(course).map_or(0, |users| users.len() as u64))
    }

    async fn enroll(&self, course: &CourseKey, user_id: DbId) -> Result<(), CoreError> {
        let mut tables = self.tables.write().await;
        tables
            .enrolled
            .entry(course.clone())
            .or_default()
            .insert(user_id);
        Ok(())
    }

    async fn is_allowed(&self, course: &CourseKey, email: &str) -> Result<bool, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .allowed
            .get(course)
            .is_some_and(|emails| emails.contains(&email.to_lowercase())))
    }

    async fn allow(&self, course: &CourseKey, email: &str) -> Result<(), CoreError> {
        let mut tables = self.tables.write().await;
        tables
            .allowed
            .entry(course.clone())
            .or_default()
            .insert(email.to_lowercase());
        Ok(())
    }

    async fn in_cart(&self, course: &CourseKey, user_id: DbId) -> Result<bool, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.carts.contains(&(course.clone(), user_id)))
    }

    async fn add_to_cart(&self, course: &CourseKey, user_id: DbId) -> Result<(), CoreError> {
        let mut tables = self.tables.write().await;
        tables.carts.insert((course.clone(), user_id));
        Ok(())
    }
}
