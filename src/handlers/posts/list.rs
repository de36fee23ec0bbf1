use axum::extract::Query;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::PostResponse;
use crate::api::pagination::{Page, Paginated};
use crate::database::manager::DatabaseManager;
use crate::database::models::PostStatus;
use crate::database::repositories::{PostRepository, PostVisibility};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, MaybeUser};

use super::utils::list_posts;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    pub category_uuid: Option<Uuid>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/posts - role-scoped listing.
/// Anonymous callers see published posts only (any status filter is
/// ignored); admins see everything; users see their own plus published.
pub async fn list(MaybeUser(user): MaybeUser, Query(query): Query<PostQuery>) -> ApiResult<Paginated<PostResponse>> {
    let visibility = match &user {
        None => PostVisibility::Public,
        Some(u) if u.is_admin() => PostVisibility::Admin { status: query.status },
        Some(u) => PostVisibility::User { user: u.uuid, status: query.status },
    };

    let page = Page::resolve(query.page, query.limit)?;
    let pool = DatabaseManager::pool().await?;

    let result = list_posts(&PostRepository::new(pool), visibility, query.category_uuid, query.search, page).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/posts/published - public listing, published posts only
pub async fn list_published(Query(query): Query<PostQuery>) -> ApiResult<Paginated<PostResponse>> {
    let page = Page::resolve(query.page, query.limit)?;
    let pool = DatabaseManager::pool().await?;

    let result = list_posts(
        &PostRepository::new(pool),
        PostVisibility::Public,
        query.category_uuid,
        query.search,
        page,
    )
    .await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/posts/my-posts - the caller's posts, any status
pub async fn list_mine(user: AuthUser, Query(query): Query<PostQuery>) -> ApiResult<Paginated<PostResponse>> {
    let page = Page::resolve(query.page, query.limit)?;
    let pool = DatabaseManager::pool().await?;

    let result = list_posts(
        &PostRepository::new(pool),
        PostVisibility::Author { user: user.uuid, status: query.status },
        query.category_uuid,
        query.search,
        page,
    )
    .await?;
    Ok(ApiResponse::success(result))
}
