use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::TagResponse;
use crate::api::validate::validate_tag_name;
use crate::database::manager::DatabaseManager;
use crate::database::models::ContentStatus;
use crate::database::repositories::TagRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub name: String,
}

/// PATCH /api/tags/:uuid - rename (admin only)
pub async fn update(
    user: AuthUser,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<UpdateTagRequest>,
) -> ApiResult<TagResponse> {
    user.require_admin()?;

    let name = payload.name.trim();
    validate_tag_name(name)?;

    let pool = DatabaseManager::pool().await?;
    let tags = TagRepository::new(pool);

    tags.find(uuid).await?.ok_or_else(|| ApiError::not_found("Tag not found"))?;

    if tags.find_by_name(name, Some(uuid)).await?.is_some() {
        return Err(ApiError::conflict("Tag with name already exists"));
    }

    tags.update_name(uuid, name).await?;

    let detail = tags.detail(uuid).await?.ok_or_else(|| ApiError::not_found("Tag not found"))?;
    Ok(ApiResponse::success(TagResponse::from(&detail)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub new_status: ContentStatus,
}

/// PATCH /api/tags/:uuid/status - toggle ACTIVE/INACTIVE (admin only)
pub async fn change_status(
    user: AuthUser,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<ChangeStatusRequest>,
) -> ApiResult<TagResponse> {
    user.require_admin()?;

    let pool = DatabaseManager::pool().await?;
    let tags = TagRepository::new(pool);

    tags.find(uuid).await?.ok_or_else(|| ApiError::not_found("Tag not found"))?;

    tags.update_status(uuid, payload.new_status).await?;

    let detail = tags.detail(uuid).await?.ok_or_else(|| ApiError::not_found("Tag not found"))?;
    Ok(ApiResponse::success(TagResponse::from(&detail)))
}
