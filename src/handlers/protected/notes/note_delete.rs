use axum::{
    extract::State,
    http::Uri,
    Extension,
};

use crate::database::User;
use crate::middleware::{ApiResult, StatusMarker};
use crate::state::AppState;

use super::note_name;

/// DELETE /notes/*name
pub async fn note_delete(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    uri: Uri,
) -> ApiResult<StatusMarker> {
    let name = note_name(&uri)?;
    state.notes().delete(user.id, &name).await?;
    Ok(StatusMarker::deleted())
}
