use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ContentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub status: PostStatus,
    pub author_uuid: Uuid,
    pub category_uuid: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row joined with its author and (optional) category, as returned by
/// the list/detail queries. Tags are fetched separately and zipped in by
/// `api::format`.
#[derive(Debug, Clone, FromRow)]
pub struct PostDetail {
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub status: PostStatus,
    pub author_uuid: Uuid,
    pub category_uuid: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_status: Option<ContentStatus>,
    pub category_created_by: Option<Uuid>,
    pub category_created_at: Option<DateTime<Utc>>,
    pub category_updated_at: Option<DateTime<Utc>>,
}
