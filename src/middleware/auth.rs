use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token gate for protected routes.
///
/// Resolves the `Authorization` header to a `User` and injects it into the request
/// extensions; handlers read it back with `Extension<User>`.
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let user = auth::resolve(header.as_deref(), state.users()).await.map_err(|e| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    tracing::debug!("Authenticated {} (id {})", user.username, user.id);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
