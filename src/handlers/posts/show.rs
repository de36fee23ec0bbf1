use axum::extract::Path;
use uuid::Uuid;

use crate::api::format::PostResponse;
use crate::database::manager::DatabaseManager;
use crate::database::models::PostStatus;
use crate::database::repositories::PostRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, MaybeUser};

use super::utils::load_post_response;

/// GET /api/posts/:uuid - published posts are public; drafts are visible
/// only to their owner or an admin.
pub async fn show(MaybeUser(user): MaybeUser, Path(uuid): Path<Uuid>) -> ApiResult<PostResponse> {
    let pool = DatabaseManager::pool().await?;
    let posts = PostRepository::new(pool);

    let response = load_post_response(&posts, uuid).await?;

    if response.status == PostStatus::Published {
        return Ok(ApiResponse::success(response));
    }

    match user {
        None => Err(ApiError::forbidden("Please log in to view this post")),
        Some(u) => {
            u.require_owner_or_admin(response.author_uuid, "view")?;
            Ok(ApiResponse::success(response))
        }
    }
}
