use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContentStatus, PostCategory, PostCategoryDetail};

const DETAIL_SELECT: &str = "SELECT c.id, c.uuid, c.name, c.status, c.created_by, c.created_at, c.updated_at, \
     u.name AS creator_name, \
     (SELECT COUNT(*) FROM posts p WHERE p.category_uuid = c.uuid) AS post_count \
     FROM post_categories c \
     JOIN users u ON u.uuid = c.created_by";

pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, name: &str, created_by: Uuid) -> Result<PostCategory, DatabaseError> {
        let category = sqlx::query_as::<_, PostCategory>(
            "INSERT INTO post_categories (name, created_by) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn find(&self, uuid: Uuid) -> Result<Option<PostCategory>, DatabaseError> {
        let category = sqlx::query_as::<_, PostCategory>("SELECT * FROM post_categories WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    /// Duplicate-name lookup, optionally excluding one row (for renames).
    pub async fn find_by_name(
        &self,
        name: &str,
        exclude_uuid: Option<Uuid>,
    ) -> Result<Option<PostCategory>, DatabaseError> {
        let category = sqlx::query_as::<_, PostCategory>(
            "SELECT * FROM post_categories WHERE name = $1 AND ($2::uuid IS NULL OR uuid <> $2)",
        )
        .bind(name)
        .bind(exclude_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<PostCategoryDetail>, DatabaseError> {
        let mut sql = String::from(DETAIL_SELECT);
        sql.push_str(" ORDER BY c.name ASC");

        let categories = sqlx::query_as::<_, PostCategoryDetail>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    pub async fn detail(&self, uuid: Uuid) -> Result<Option<PostCategoryDetail>, DatabaseError> {
        let mut sql = String::from(DETAIL_SELECT);
        sql.push_str(" WHERE c.uuid = $1");

        let category = sqlx::query_as::<_, PostCategoryDetail>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    pub async fn update_name(&self, uuid: Uuid, name: &str) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE post_categories SET name = $2, updated_at = now() WHERE uuid = $1")
            .bind(uuid)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_status(&self, uuid: Uuid, status: ContentStatus) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE post_categories SET status = $2, updated_at = now() WHERE uuid = $1")
            .bind(uuid)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, uuid: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM post_categories WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
