use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use watchlist_core::models::input::{AddWatchedGroupInput, ValidateExt};
use watchlist_core::WatchedList;

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn add_watched_group_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    payload: Result<Json<AddWatchedGroupInput>, JsonRejection>,
) -> Result<Json<WatchedList>, ApiError> {
    let Json(input) = payload?;
    input.validate_input()?;
    let list = state
        .store
        .add_watched_group(&user_id, &input.group_id, &input.display_name)?;
    Ok(Json(list))
}

pub async fn delete_watched_group_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    Path(group_id): Path<String>,
) -> Result<Json<WatchedList>, ApiError> {
    Ok(Json(state.store.delete_watched_group(&user_id, &group_id)?))
}
