/// Storage key holding a user's watchlist document.
pub fn kv_key_for_user(user_id: &str) -> String {
    format!("watched_{}", user_id)
}

/// Fresh identifier for a newly created folder.
pub fn new_folder_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
