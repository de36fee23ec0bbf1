pub mod auth;
pub mod response;

pub use auth::{AuthUser, MaybeUser};
pub use response::{ApiResponse, ApiResult};
