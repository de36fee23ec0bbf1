use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::format::CategoryResponse;
use crate::api::validate::validate_category_name;
use crate::database::manager::DatabaseManager;
use crate::database::models::ContentStatus;
use crate::database::repositories::CategoryRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
}

/// PATCH /api/post-categories/:uuid - rename (admin only)
pub async fn update(
    user: AuthUser,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> ApiResult<CategoryResponse> {
    user.require_admin()?;

    let name = payload.name.trim();
    validate_category_name(name)?;

    let pool = DatabaseManager::pool().await?;
    let categories = CategoryRepository::new(pool);

    categories
        .find(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    // Renaming to another row's name is a conflict; renaming to itself is fine
    if categories.find_by_name(name, Some(uuid)).await?.is_some() {
        return Err(ApiError::conflict("Category name already exists"));
    }

    categories.update_name(uuid, name).await?;

    let detail = categories
        .detail(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(CategoryResponse::from(&detail)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub new_status: ContentStatus,
}

/// PATCH /api/post-categories/:uuid/status - toggle ACTIVE/INACTIVE (admin only)
pub async fn change_status(
    user: AuthUser,
    Path(uuid): Path<Uuid>,
    Json(payload): Json<ChangeStatusRequest>,
) -> ApiResult<CategoryResponse> {
    user.require_admin()?;

    let pool = DatabaseManager::pool().await?;
    let categories = CategoryRepository::new(pool);

    categories
        .find(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    categories.update_status(uuid, payload.new_status).await?;

    let detail = categories
        .detail(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(ApiResponse::success(CategoryResponse::from(&detail)))
}
