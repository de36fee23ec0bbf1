use axum::extract::Path;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::repositories::CategoryRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// DELETE /api/post-categories/:uuid - admin only. Posts referencing the
/// category keep existing with a NULL category (FK SET NULL).
pub async fn delete(user: AuthUser, Path(uuid): Path<Uuid>) -> ApiResult<Value> {
    user.require_admin()?;

    let pool = DatabaseManager::pool().await?;
    let categories = CategoryRepository::new(pool);

    categories
        .find(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    categories.delete(uuid).await?;

    Ok(ApiResponse::success(json!({ "message": "Category deleted successfully" })))
}
