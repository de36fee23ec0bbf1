use axum::extract::Path;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::repositories::TagRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// DELETE /api/tags/:uuid - admin only; join rows cascade
pub async fn delete(user: AuthUser, Path(uuid): Path<Uuid>) -> ApiResult<Value> {
    user.require_admin()?;

    let pool = DatabaseManager::pool().await?;
    let tags = TagRepository::new(pool);

    tags.find(uuid).await?.ok_or_else(|| ApiError::not_found("Tag not found"))?;

    tags.delete(uuid).await?;

    Ok(ApiResponse::success(json!({ "message": "Tag deleted successfully" })))
}
