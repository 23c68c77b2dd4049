use axum::extract::State;
use axum::Json;
use tracing::debug;
use watchlist_core::StatusResponse;

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_statuses_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<StatusResponse>, ApiError> {
    let list = state.store.get(&user_id)?;
    let response = state.aggregator.snapshot(&list)?;
    debug!(
        user_id = %user_id,
        uncategorized = response.uncategorized.len(),
        folders = response.folders.len(),
        groups = response.groups.len(),
        "Built status snapshot"
    );
    Ok(Json(response))
}
