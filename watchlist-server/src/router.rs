use axum::routing::{get, put};
use axum::Router;

use crate::handlers::folders::{create_folder_handler, delete_folder_handler, rename_folder_handler};
use crate::handlers::groups::{group_members_handler, search_groups_handler};
use crate::handlers::health::health_handler;
use crate::handlers::statuses::get_statuses_handler;
use crate::handlers::watched_groups::{add_watched_group_handler, delete_watched_group_handler};
use crate::handlers::watched_users::{get_watched_users_handler, put_watched_users_handler};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/watched-users",
            get(get_watched_users_handler).put(put_watched_users_handler),
        )
        .route("/statuses", get(get_statuses_handler))
        .route("/groups", get(search_groups_handler))
        .route("/groups/{group_id}/members", get(group_members_handler))
        .route("/folders", axum::routing::post(create_folder_handler))
        .route(
            "/folders/{folder_id}",
            put(rename_folder_handler).delete(delete_folder_handler),
        )
        .route("/watched-groups", axum::routing::post(add_watched_group_handler))
        .route(
            "/watched-groups/{group_id}",
            axum::routing::delete(delete_watched_group_handler),
        );

    Router::new()
        .route("/api/health", get(health_handler))
        .nest("/api/v1", api)
        .with_state(state)
}
