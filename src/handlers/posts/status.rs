use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::PostResponse;
use crate::database::manager::DatabaseManager;
use crate::database::models::PostStatus;
use crate::database::repositories::PostRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::utils::load_post_response;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: PostStatus,
}

/// PATCH /api/posts/:uuid/status - flip DRAFT/PUBLISHED
pub async fn update_status(
    user: AuthUser,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> ApiResult<PostResponse> {
    let pool = DatabaseManager::pool().await?;
    let posts = PostRepository::new(pool);

    let post = posts
        .find(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    user.require_owner_or_admin(post.author_uuid, "update the status of")?;

    posts.update_status(uuid, payload.status).await?;

    let response = load_post_response(&posts, uuid).await?;
    Ok(ApiResponse::success(response))
}
