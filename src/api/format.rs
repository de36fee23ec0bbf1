// Response shaping: database rows -> wire format (camelCase JSON)
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{
    ContentStatus, PostCategory, PostCategoryDetail, PostDetail, PostStatus, PostTagRow, Tag,
    TagDetail, User, UserRole,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            uuid: user.uuid,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Abbreviated author/creator embed. Email is included on post detail
/// responses but omitted from creator refs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub uuid: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            uuid: tag.uuid,
            name: tag.name.clone(),
            status: tag.status,
            created_at: tag.created_at,
            post_count: None,
        }
    }
}

impl From<&TagDetail> for TagResponse {
    fn from(tag: &TagDetail) -> Self {
        Self {
            id: tag.id,
            uuid: tag.uuid,
            name: tag.name.clone(),
            status: tag.status,
            created_at: tag.created_at,
            post_count: Some(tag.post_count),
        }
    }
}

impl From<&PostTagRow> for TagResponse {
    fn from(row: &PostTagRow) -> Self {
        Self {
            id: row.id,
            uuid: row.uuid,
            name: row.name.clone(),
            status: row.status,
            created_at: row.created_at,
            post_count: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub status: ContentStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<AuthorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostResponse>>,
}

impl From<&PostCategoryDetail> for CategoryResponse {
    fn from(category: &PostCategoryDetail) -> Self {
        Self {
            id: category.id,
            uuid: category.uuid,
            name: category.name.clone(),
            status: category.status,
            created_by: category.created_by,
            created_at: category.created_at,
            updated_at: category.updated_at,
            creator: Some(AuthorRef {
                uuid: category.created_by,
                name: category.creator_name.clone(),
                email: None,
            }),
            post_count: Some(category.post_count),
            posts: None,
        }
    }
}

impl From<&PostCategory> for CategoryResponse {
    fn from(category: &PostCategory) -> Self {
        Self {
            id: category.id,
            uuid: category.uuid,
            name: category.name.clone(),
            status: category.status,
            created_by: category.created_by,
            created_at: category.created_at,
            updated_at: category.updated_at,
            creator: None,
            post_count: None,
            posts: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
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
    pub author: AuthorRef,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<TagResponse>,
}

/// Build a post response from a joined row plus its tag rows.
pub fn post_response(detail: &PostDetail, tags: &[PostTagRow]) -> PostResponse {
    let category = detail.category_id.map(|id| CategoryResponse {
        id,
        // Joined columns are all present when the category row exists
        uuid: detail.category_uuid.unwrap_or_default(),
        name: detail.category_name.clone().unwrap_or_default(),
        status: detail.category_status.unwrap_or(ContentStatus::Active),
        created_by: detail.category_created_by.unwrap_or_default(),
        created_at: detail.category_created_at.unwrap_or(detail.created_at),
        updated_at: detail.category_updated_at.unwrap_or(detail.created_at),
        creator: None,
        post_count: None,
        posts: None,
    });

    PostResponse {
        id: detail.id,
        uuid: detail.uuid,
        title: detail.title.clone(),
        content: detail.content.clone(),
        image_url: detail.image_url.clone(),
        status: detail.status,
        author_uuid: detail.author_uuid,
        category_uuid: detail.category_uuid,
        created_at: detail.created_at,
        updated_at: detail.updated_at,
        author: AuthorRef {
            uuid: detail.author_uuid,
            name: detail.author_name.clone(),
            email: Some(detail.author_email.clone()),
        },
        category,
        tags: tags.iter().map(TagResponse::from).collect(),
    }
}

/// Zip a page of posts with a flat batch of tag rows (one query's worth),
/// preserving post order.
pub fn post_responses(details: &[PostDetail], tag_rows: &[PostTagRow]) -> Vec<PostResponse> {
    let mut by_post: HashMap<Uuid, Vec<&PostTagRow>> = HashMap::new();
    for row in tag_rows {
        by_post.entry(row.post_uuid).or_default().push(row);
    }

    details
        .iter()
        .map(|detail| {
            let tags: Vec<PostTagRow> = by_post
                .get(&detail.uuid)
                .map(|rows| rows.iter().map(|r| (*r).clone()).collect())
                .unwrap_or_default();
            post_response(detail, &tags)
        })
        .collect()
}
