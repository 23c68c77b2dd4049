use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use watchlist_core::models::input::{FolderNameInput, ValidateExt};
use watchlist_core::WatchedList;

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_folder_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    payload: Result<Json<FolderNameInput>, JsonRejection>,
) -> Result<Json<WatchedList>, ApiError> {
    let Json(input) = payload?;
    input.validate_input()?;
    Ok(Json(state.store.create_folder(&user_id, &input.name)?))
}

pub async fn rename_folder_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    Path(folder_id): Path<String>,
    payload: Result<Json<FolderNameInput>, JsonRejection>,
) -> Result<Json<WatchedList>, ApiError> {
    let Json(input) = payload?;
    input.validate_input()?;
    Ok(Json(state.store.rename_folder(&user_id, &folder_id, &input.name)?))
}

pub async fn delete_folder_handler(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    Path(folder_id): Path<String>,
) -> Result<Json<WatchedList>, ApiError> {
    Ok(Json(state.store.delete_folder(&user_id, &folder_id)?))
}
