use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use watchlist_core::WatchedList;

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_watched_users_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<WatchedList>, ApiError> {
    Ok(Json(state.store.get(&user_id)?))
}

/// Bulk replace. The body is normalized and validated before it is stored.
pub async fn put_watched_users_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    payload: Result<Json<WatchedList>, JsonRejection>,
) -> Result<Json<WatchedList>, ApiError> {
    let Json(list) = payload?;
    Ok(Json(state.store.replace(&user_id, list)?))
}
