use axum::extract::Path;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::repositories::PostRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::storage::ImageStore;

/// DELETE /api/posts/:uuid - remove the post, its join rows and its image
pub async fn delete(user: AuthUser, Path(uuid): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let posts = PostRepository::new(pool);

    let post = posts
        .find(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    user.require_owner_or_admin(post.author_uuid, "delete")?;

    if let Some(image_url) = &post.image_url {
        ImageStore::from_config().delete(image_url).await;
    }

    posts.delete(uuid).await?;

    Ok(ApiResponse::success(json!({ "message": "Post deleted successfully" })))
}
