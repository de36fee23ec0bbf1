use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::ContentStatus;

#[derive(Debug, Clone, FromRow)]
pub struct PostCategory {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub status: ContentStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category row joined with its creator's name and the number of posts
/// referencing it.
#[derive(Debug, Clone, FromRow)]
pub struct PostCategoryDetail {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub status: ContentStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator_name: String,
    pub post_count: i64,
}
