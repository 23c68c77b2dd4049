use serde::{Deserialize, Serialize};

/// Presence state reported for a watched user.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    Dnd,
    #[default]
    Offline,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct UserStatusInfo {
    pub user_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub status: PresenceStatus,
    pub custom_status: String,
    pub custom_emoji: String,
    pub last_activity_at: i64,
}

impl UserStatusInfo {
    /// Placeholder for a user the presence source knows nothing about.
    pub fn offline(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            status: PresenceStatus::Offline,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FolderWithStatuses {
    pub id: String,
    pub name: String,
    pub users: Vec<UserStatusInfo>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GroupWithStatuses {
    pub group_id: String,
    pub display_name: String,
    pub users: Vec<UserStatusInfo>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StatusResponse {
    pub uncategorized: Vec<UserStatusInfo>,
    pub folders: Vec<FolderWithStatuses>,
    pub groups: Vec<GroupWithStatuses>,
}
