use axum::{
    body::Bytes,
    extract::State,
    http::Uri,
    Extension,
};
use serde::Deserialize;

use crate::database::User;
use crate::middleware::{ApiResult, StatusMarker};
use crate::state::AppState;

use super::{note_name, parse_json_body};

#[derive(Debug, Deserialize)]
pub struct UpdateNote {
    #[serde(default)]
    pub content: String,
}

/// PUT /notes/*name - replace the content of an existing note; 404 if there is none
pub async fn note_put(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    uri: Uri,
    body: Bytes,
) -> ApiResult<StatusMarker> {
    let name = note_name(&uri)?;
    let input: UpdateNote = parse_json_body(&body)?;

    state.notes().update(user.id, &name, &input.content).await?;
    Ok(StatusMarker::updated())
}
