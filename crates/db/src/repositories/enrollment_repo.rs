//! Repository for enrollments, the invitation allow-list, and carts.

use async_trait::async_trait;
use courseware_core::assets::key::CourseKey;
use courseware_core::error::CoreError;
use courseware_core::store::EnrollmentStore;
use courseware_core::types::DbId;
use sqlx::PgPool;

use super::storage_error;

pub struct EnrollmentRepo {
    pool: PgPool,
}

impl EnrollmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentStore for EnrollmentRepo {
    async fn is_enrolled(&self, course: &CourseKey, user_id: DbId) -> Result<bool, CoreError> {
        let (found,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM course_enrollments WHERE course_key = $1 AND user_id = $2)",
        )
        .bind(course.to_string())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(found)
    }

    async fn enrollment_count(&self, course: &CourseKey) -> Result<u64, CoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM course_enrollments WHERE course_key = $1")
                .bind(course.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(storage_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn enroll(&self, course: &CourseKey, user_id: DbId) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO course_enrollments (course_key, user_id) VALUES ($1, $2) \
             ON CONFLICT (course_key, user_id) DO NOTHING",
        )
        .bind(course.to_string())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn is_allowed(&self, course: &CourseKey, email: &str) -> Result<bool, CoreError> {
        let (found,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(\
                SELECT 1 FROM course_enrollment_allowed WHERE course_key = $1 AND email = $2\
             )",
        )
        .bind(course.to_string())
        .bind(email.to_lowercase())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(found)
    }

    async fn allow(&self, course: &CourseKey, email: &str) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO course_enrollment_allowed (course_key, email) VALUES ($1, $2) \
             ON CONFLICT (course_key, email) DO NOTHING",
        )
        .bind(course.to_string())
        .bind(email.to_lowercase())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn in_cart(&self, course: &CourseKey, user_id: DbId) -> Result<bool, CoreError> {
        let (found,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM cart_items WHERE course_key = $1 AND user_id = $2)",
        )
        .bind(course.to_string())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(found)
    }

    async fn add_to_cart(&self, course: &CourseKey, user_id: DbId) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO cart_items (course_key, user_id) VALUES ($1, $2) \
             ON CONFLICT (course_key, user_id) DO NOTHING",
        )
        .bind(course.to_string())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }
}
