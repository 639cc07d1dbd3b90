use thiserror::Error;

use crate::database::{User, UserStore};

/// Why a request could not be tied to a user.
///
/// `MissingToken` and `InvalidToken` are the caller's problem (401); `Internal` means
/// the lookup itself failed and must surface as a server error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing or invalid bearer token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("internal error")]
    Internal,
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts `<scheme> <token>` where the scheme is `Bearer` in any case. The token is
/// trimmed and must not be empty.
pub fn parse_bearer(header: Option<&str>) -> Option<&str> {
    let header = header?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve an `Authorization` header to the user owning the token. Performs at most
/// one store lookup and never caches.
pub async fn resolve(header: Option<&str>, users: &dyn UserStore) -> Result<User, AuthError> {
    let token = parse_bearer(header).ok_or(AuthError::MissingToken)?;

    match users.find_by_token(token).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(AuthError::InvalidToken),
        Err(e) => {
            tracing::error!("query user: {}", e);
            Err(AuthError::Internal)
        }
    }
}
