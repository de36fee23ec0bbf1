use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::auth::verify_jwt;
use crate::database::manager::DatabaseManager;
use crate::database::models::UserRole;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;

/// Authenticated user context, extracted from a Bearer JWT and re-validated
/// against the users table (a token for a deleted account is rejected).
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Role gate for admin-only handlers.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Admin role required"))
        }
    }

    /// Ownership gate: admins may act on any row, users only on their own.
    pub fn require_owner_or_admin(&self, owner: Uuid, action: &str) -> Result<(), ApiError> {
        if self.is_admin() || self.uuid == owner {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!("You can only {} your own posts", action)))
        }
    }
}

/// Optional authentication: anonymous requests pass through as `None`, but a
/// presented token must still be valid.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts).ok_or_else(|| {
            ApiError::unauthorized("Missing or malformed Authorization header")
        })??;

        authenticate(&token).await
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match extract_bearer_token(parts) {
            None => Ok(MaybeUser(None)),
            Some(token) => Ok(MaybeUser(Some(authenticate(&token?).await?))),
        }
    }
}

/// Returns None when no Authorization header is present, and an error when
/// one is present but not in Bearer form.
fn extract_bearer_token(parts: &Parts) -> Option<Result<String, ApiError>> {
    let header = parts.headers.get("authorization")?;

    let value = match header.to_str() {
        Ok(v) => v,
        Err(_) => return Some(Err(ApiError::unauthorized("Invalid Authorization header format"))),
    };

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Some(Ok(token.to_string())),
        _ => Some(Err(ApiError::unauthorized("Authorization header must use Bearer token format"))),
    }
}

async fn authenticate(token: &str) -> Result<AuthUser, ApiError> {
    let claims = verify_jwt(token)?;

    let pool = DatabaseManager::pool().await?;
    let user = UserRepository::new(pool)
        .find_by_uuid(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(AuthUser { uuid: user.uuid, name: user.name, email: user.email, role: user.role })
}
