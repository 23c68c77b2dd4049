//! Records returned by the user/group directory and the presence source.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::status::PresenceStatus;

/// Profile property holding the JSON-encoded custom status.
pub const CUSTOM_STATUS_PROP: &str = "customStatus";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub props: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupSource {
    #[default]
    Custom,
    Ldap,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GroupRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub source: GroupSource,
    #[serde(default)]
    pub member_count: Option<i64>,
    /// Non-zero once the group has been deleted.
    #[serde(default)]
    pub delete_at: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub user_id: String,
    pub status: PresenceStatus,
    #[serde(default)]
    pub last_activity_at: i64,
}

/// Group search result.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub member_count: i64,
}

impl From<&GroupRecord> for GroupInfo {
    fn from(group: &GroupRecord) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone().unwrap_or_default(),
            display_name: group.display_name.clone(),
            member_count: group.member_count.unwrap_or(0),
        }
    }
}
