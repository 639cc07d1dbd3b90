use axum::{body::Bytes, extract::State, Extension};
use serde::Deserialize;

use crate::database::{CreateOutcome, User};
use crate::error::ApiError;
use crate::middleware::{ApiResult, StatusMarker};
use crate::state::AppState;

use super::parse_json_body;

#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

/// POST /notes - create-or-ignore
///
/// A name the caller already has is left untouched (its content is not replaced) and
/// the response is still 201 `{"status":"created"}`.
pub async fn notes_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    body: Bytes,
) -> ApiResult<StatusMarker> {
    let input: CreateNote = parse_json_body(&body)?;
    if input.name.trim().is_empty() {
        return Err(ApiError::bad_request("name required"));
    }

    let outcome = state
        .notes()
        .create(user.id, &input.name, &input.content)
        .await?;

    if outcome == CreateOutcome::Ignored {
        tracing::debug!("note '{}' already exists for user {}, left unchanged", input.name, user.id);
    }

    Ok(StatusMarker::created())
}
