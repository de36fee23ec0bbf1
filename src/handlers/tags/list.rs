use axum::extract::Path;
use uuid::Uuid;

use crate::api::format::TagResponse;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::TagRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/tags - all tags with post counts, ordered by name
pub async fn list() -> ApiResult<Vec<TagResponse>> {
    let pool = DatabaseManager::pool().await?;

    let tags = TagRepository::new(pool).list().await?;
    Ok(ApiResponse::success(tags.iter().map(TagResponse::from).collect()))
}

/// GET /api/tags/:uuid
pub async fn show(Path(uuid): Path<Uuid>) -> ApiResult<TagResponse> {
    let pool = DatabaseManager::pool().await?;

    let tag = TagRepository::new(pool)
        .detail(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag not found"))?;

    Ok(ApiResponse::success(TagResponse::from(&tag)))
}
