use serde::Serialize;

use crate::api::format::UserResponse;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

/// GET /api/auth/me - current authenticated user
pub async fn me(auth: AuthUser) -> ApiResult<MeResponse> {
    let pool = DatabaseManager::pool().await?;

    let user = UserRepository::new(pool)
        .find_by_uuid(auth.uuid)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(ApiResponse::success(MeResponse { user: UserResponse::from(&user) }))
}
