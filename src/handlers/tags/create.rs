use axum::Json;
use serde::Deserialize;

use crate::api::format::TagResponse;
use crate::api::validate::validate_tag_name;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::TagRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// POST /api/tags - admin only
pub async fn create(user: AuthUser, Json(payload): Json<CreateTagRequest>) -> ApiResult<TagResponse> {
    user.require_admin()?;

    let name = payload.name.trim();
    validate_tag_name(name)?;

    let pool = DatabaseManager::pool().await?;
    let tags = TagRepository::new(pool);

    if tags.find_by_name(name, None).await?.is_some() {
        return Err(ApiError::conflict("Tag with name already exists"));
    }

    let tag = tags.insert(name).await?;
    Ok(ApiResponse::created(TagResponse::from(&tag)))
}
