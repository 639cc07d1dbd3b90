use axum::Extension;

use crate::database::User;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /me - the identity the bearer token resolved to
pub async fn me_get(Extension(user): Extension<User>) -> ApiResult<User> {
    Ok(ApiResponse::success(user))
}
