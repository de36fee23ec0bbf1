use axum::Json;
use serde::Deserialize;

use crate::api::format::{AuthResponse, UserResponse};
use crate::auth::{generate_jwt, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login - verify credentials and return a token.
/// Unknown email and wrong password are indistinguishable on the wire.
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<AuthResponse> {
    let pool = DatabaseManager::pool().await?;

    let user = UserRepository::new(pool)
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !bcrypt::verify(&payload.password, &user.password)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = generate_jwt(&Claims::new(user.uuid, user.email.clone(), user.role))?;

    Ok(ApiResponse::success(AuthResponse { user: UserResponse::from(&user), token }))
}
