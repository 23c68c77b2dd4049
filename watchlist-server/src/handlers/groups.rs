use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use watchlist_core::models::input::{GroupSearchInput, ValidateExt};
use watchlist_core::{search_groups, GroupInfo};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GroupMembersResponse {
    pub user_ids: Vec<String>,
}

pub async fn search_groups_handler(
    State(state): State<AppState>,
    _caller: Caller,
    query: Result<Query<GroupSearchInput>, QueryRejection>,
) -> Result<Json<Vec<GroupInfo>>, ApiError> {
    let Query(input) = query?;
    input.validate_input()?;
    Ok(Json(search_groups(state.directory.as_ref(), &input.q)?))
}

pub async fn group_members_handler(
    State(state): State<AppState>,
    _caller: Caller,
    Path(group_id): Path<String>,
) -> Result<Json<GroupMembersResponse>, ApiError> {
    let user_ids = state.resolver.members(&group_id)?;
    Ok(Json(GroupMembersResponse { user_ids }))
}
