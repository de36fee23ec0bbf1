use axum::Json;
use serde::Deserialize;

use crate::api::format::CategoryResponse;
use crate::api::validate::validate_category_name;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::CategoryRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// POST /api/post-categories - admin only
pub async fn create(user: AuthUser, Json(payload): Json<CreateCategoryRequest>) -> ApiResult<CategoryResponse> {
    user.require_admin()?;

    let name = payload.name.trim();
    validate_category_name(name)?;

    let pool = DatabaseManager::pool().await?;
    let categories = CategoryRepository::new(pool);

    if categories.find_by_name(name, None).await?.is_some() {
        return Err(ApiError::conflict("Category name already exists"));
    }

    let category = categories.insert(name, user.uuid).await?;
    let detail = categories
        .detail(category.uuid)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Failed to load created category"))?;

    Ok(ApiResponse::created(CategoryResponse::from(&detail)))
}
