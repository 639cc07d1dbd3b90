// handlers/mod.rs
//
// Public (no auth) → Protected (bearer token resolved to a user)
pub mod protected;
pub mod public;

pub use protected::*;
pub use public::*;

use axum::http::{Method, Uri};

use crate::error::ApiError;

/// Fallback for paths no route matched. `/notes/` with nothing after the prefix is a
/// malformed note path rather than an unknown resource.
pub async fn fallback(method: Method, uri: Uri) -> ApiError {
    if uri.path() == "/notes/" {
        return ApiError::bad_request("invalid note name");
    }
    tracing::debug!("No route for {} {}", method, uri.path());
    ApiError::not_found("not found")
}
