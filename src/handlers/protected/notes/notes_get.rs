use axum::{extract::State, Extension};

use crate::database::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /notes - names of the caller's notes, ascending; `[]` when there are none
pub async fn notes_get(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Vec<String>> {
    let names = state.notes().list(user.id).await?;
    Ok(ApiResponse::success(names))
}
