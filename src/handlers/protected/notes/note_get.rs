use axum::{
    extract::State,
    http::Uri,
    Extension,
};

use crate::database::{Note, User};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::note_name;

/// GET /notes/*name - a single note owned by the caller
pub async fn note_get(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    uri: Uri,
) -> ApiResult<Note> {
    let name = note_name(&uri)?;
    let note = state.notes().get(user.id, &name).await?;
    Ok(ApiResponse::success(note))
}
