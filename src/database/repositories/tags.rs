use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContentStatus, Tag, TagDetail};

const DETAIL_SELECT: &str = "SELECT t.id, t.uuid, t.name, t.status, t.created_at, \
     (SELECT COUNT(*) FROM post_tags pt WHERE pt.tag_uuid = t.uuid) AS post_count \
     FROM tags t";

pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, name: &str) -> Result<Tag, DatabaseError> {
        let tag = sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(tag)
    }

    pub async fn find(&self, uuid: Uuid) -> Result<Option<Tag>, DatabaseError> {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tag)
    }

    pub async fn find_by_name(
        &self,
        name: &str,
        exclude_uuid: Option<Uuid>,
    ) -> Result<Option<Tag>, DatabaseError> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT * FROM tags WHERE name = $1 AND ($2::uuid IS NULL OR uuid <> $2)",
        )
        .bind(name)
        .bind(exclude_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tag)
    }

    /// How many of the given uuids actually exist; used to validate tag sets
    /// on post create/update in one round trip.
    pub async fn count_existing(&self, uuids: &[Uuid]) -> Result<i64, DatabaseError> {
        if uuids.is_empty() {
            return Ok(0);
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE uuid = ANY($1)")
            .bind(uuids)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn list(&self) -> Result<Vec<TagDetail>, DatabaseError> {
        let mut sql = String::from(DETAIL_SELECT);
        sql.push_str(" ORDER BY t.name ASC");

        let tags = sqlx::query_as::<_, TagDetail>(&sql).fetch_all(&self.pool).await?;

        Ok(tags)
    }

    pub async fn detail(&self, uuid: Uuid) -> Result<Option<TagDetail>, DatabaseError> {
        let mut sql = String::from(DETAIL_SELECT);
        sql.push_str(" WHERE t.uuid = $1");

        let tag = sqlx::query_as::<_, TagDetail>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tag)
    }

    pub async fn update_name(&self, uuid: Uuid, name: &str) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE tags SET name = $2 WHERE uuid = $1")
            .bind(uuid)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_status(&self, uuid: Uuid, status: ContentStatus) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE tags SET status = $2 WHERE uuid = $1")
            .bind(uuid)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, uuid: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM tags WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
