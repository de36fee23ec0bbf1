use axum::Json;
use serde::Deserialize;

use crate::api::format::{AuthResponse, UserResponse};
use crate::api::validate::validate_register;
use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::UserRole;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// POST /api/auth/register - create an account and return a token
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<AuthResponse> {
    validate_register(&payload.name, &payload.email, &payload.password, &payload.confirm_password)?;

    let pool = DatabaseManager::pool().await?;
    let users = UserRepository::new(pool);

    if users.find_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::conflict("User with this email already exists"));
    }

    let cost = config::config().security.bcrypt_cost;
    let password_hash = bcrypt::hash(&payload.password, cost)?;

    let user = users
        .insert(payload.name.trim(), &payload.email, &password_hash, UserRole::User)
        .await?;

    let token = generate_jwt(&Claims::new(user.uuid, user.email.clone(), user.role))?;

    Ok(ApiResponse::created(AuthResponse { user: UserResponse::from(&user), token }))
}
