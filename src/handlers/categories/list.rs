use axum::extract::{Path, Query};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::CategoryResponse;
use crate::api::pagination::Page;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::{CategoryRepository, PostRepository, PostVisibility};
use crate::error::ApiError;
use crate::handlers::posts::list_category_posts;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/post-categories - all categories with creator and post count
pub async fn list() -> ApiResult<Vec<CategoryResponse>> {
    let pool = DatabaseManager::pool().await?;

    let categories = CategoryRepository::new(pool).list().await?;
    Ok(ApiResponse::success(categories.iter().map(CategoryResponse::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowQuery {
    pub include_posts: Option<String>,
}

/// GET /api/post-categories/:uuid - single category; `?includePosts=true`
/// embeds the 10 most recent published posts in the category.
pub async fn show(Path(uuid): Path<Uuid>, Query(query): Query<ShowQuery>) -> ApiResult<CategoryResponse> {
    let pool = DatabaseManager::pool().await?;

    let detail = CategoryRepository::new(pool.clone())
        .detail(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    let mut response = CategoryResponse::from(&detail);

    if query.include_posts.as_deref() == Some("true") {
        let posts = PostRepository::new(pool);
        let embedded = list_category_posts(
            &posts,
            PostVisibility::Public,
            uuid,
            Page { page: 1, limit: 10 },
        )
        .await?;
        response.posts = Some(embedded);
    }

    Ok(ApiResponse::success(response))
}
