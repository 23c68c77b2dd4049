//! Persisted watchlist document.
//!
//! Every field decodes leniently: a missing key or an explicit `null` becomes
//! the empty value, so a decoded list never carries absent collections.

use serde::{Deserialize, Serialize};

use super::{null_as_default, null_elements_as_default};

/// Schema number written on every save.
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

pub const MAX_FOLDERS: usize = 50;
pub const MAX_WATCHED_GROUPS: usize = 20;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WatchedList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_elements_as_default")]
    pub folders: Vec<Folder>,
    #[serde(default, deserialize_with = "null_elements_as_default")]
    pub groups: Vec<WatchedGroup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Folder {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct WatchedGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

impl WatchedList {
    pub fn empty() -> Self {
        Self::with_user_ids(Vec::new())
    }

    pub fn with_user_ids(user_ids: Vec<String>) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            user_ids,
            folders: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn folder_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == folder_id)
    }

    pub fn is_watching_group(&self, group_id: &str) -> bool {
        self.groups.iter().any(|g| g.group_id == group_id)
    }
}

impl Default for WatchedList {
    fn default() -> Self {
        Self::empty()
    }
}
