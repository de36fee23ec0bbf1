use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::ContentStatus;

#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
}

/// Tag row with the number of posts it is attached to.
#[derive(Debug, Clone, FromRow)]
pub struct TagDetail {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub post_count: i64,
}

/// Tag joined via post_tags; used when zipping tags into post responses.
#[derive(Debug, Clone, FromRow)]
pub struct PostTagRow {
    pub post_uuid: Uuid,
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
}
