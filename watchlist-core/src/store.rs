//! Per-user watchlist persistence and mutations.
//!
//! Every operation reads the owner's document once and, when it succeeds,
//! writes it back once. There is no locking: two writers for the same owner
//! race and the last completed write wins for the whole document.

use std::sync::Arc;

use tracing::{debug, info};

use crate::directory::Directory;
use crate::error::{WatchlistError, WatchlistResult};
use crate::kv::KvStore;
use crate::migrate::migrate;
use crate::models::watchlist::{MAX_FOLDERS, MAX_WATCHED_GROUPS};
use crate::models::{Folder, WatchedGroup, WatchedList, CURRENT_SCHEMA_VERSION};
use crate::utils::helpers::{kv_key_for_user, new_folder_id};
use crate::utils::validation::{validate_folder_name, validate_watched_list};

pub struct WatchlistStore {
    kv: Arc<dyn KvStore>,
    directory: Arc<dyn Directory>,
}

impl WatchlistStore {
    pub fn new(kv: Arc<dyn KvStore>, directory: Arc<dyn Directory>) -> Self {
        Self { kv, directory }
    }

    /// Load the owner's watchlist, upgrading older layouts on the fly.
    pub fn get(&self, owner: &str) -> WatchlistResult<WatchedList> {
        let raw = self.kv.get(&kv_key_for_user(owner))?;
        Ok(migrate(raw.as_deref()))
    }

    fn save(&self, owner: &str, list: &mut WatchedList) -> WatchlistResult<()> {
        list.version = CURRENT_SCHEMA_VERSION;
        let data = serde_json::to_vec(list)?;
        self.kv.set(&kv_key_for_user(owner), &data)?;
        debug!(
            owner,
            folders = list.folders.len(),
            groups = list.groups.len(),
            "Saved watchlist"
        );
        Ok(())
    }

    /// Replace the whole watchlist with a caller-supplied document.
    pub fn replace(&self, owner: &str, mut list: WatchedList) -> WatchlistResult<WatchedList> {
        validate_watched_list(&mut list)?;
        self.save(owner, &mut list)?;
        Ok(list)
    }

    pub fn create_folder(&self, owner: &str, name: &str) -> WatchlistResult<WatchedList> {
        let name = validate_folder_name(name)?;
        let mut list = self.get(owner)?;

        if list.folders.len() >= MAX_FOLDERS {
            return Err(WatchlistError::Validation(
                "Maximum number of folders reached".to_string(),
            ));
        }

        let folder = Folder {
            id: new_folder_id(),
            name,
            user_ids: Vec::new(),
        };
        info!(owner, folder_id = %folder.id, "Creating folder");
        list.folders.push(folder);

        self.save(owner, &mut list)?;
        Ok(list)
    }

    pub fn rename_folder(
        &self,
        owner: &str,
        folder_id: &str,
        name: &str,
    ) -> WatchlistResult<WatchedList> {
        let name = validate_folder_name(name)?;
        let mut list = self.get(owner)?;

        let folder = list
            .folder_mut(folder_id)
            .ok_or_else(|| WatchlistError::NotFound("Folder not found".to_string()))?;
        folder.name = name;

        self.save(owner, &mut list)?;
        Ok(list)
    }

    /// Remove a folder, moving its members to the end of the uncategorized list.
    pub fn delete_folder(&self, owner: &str, folder_id: &str) -> WatchlistResult<WatchedList> {
        let mut list = self.get(owner)?;

        let index = list
            .folders
            .iter()
            .position(|f| f.id == folder_id)
            .ok_or_else(|| WatchlistError::NotFound("Folder not found".to_string()))?;
        let folder = list.folders.remove(index);
        info!(
            owner,
            folder_id,
            moved = folder.user_ids.len(),
            "Deleting folder"
        );
        list.user_ids.extend(folder.user_ids);

        self.save(owner, &mut list)?;
        Ok(list)
    }

    pub fn add_watched_group(
        &self,
        owner: &str,
        group_id: &str,
        display_name: &str,
    ) -> WatchlistResult<WatchedList> {
        if group_id.is_empty() {
            return Err(WatchlistError::Validation(
                "group_id is required".to_string(),
            ));
        }

        if self.directory.get_group(group_id)?.is_none() {
            return Err(WatchlistError::NotFound("Group not found".to_string()));
        }

        let mut list = self.get(owner)?;

        if list.groups.len() >= MAX_WATCHED_GROUPS {
            return Err(WatchlistError::Validation(
                "Maximum number of watched groups reached".to_string(),
            ));
        }
        if list.is_watching_group(group_id) {
            return Err(WatchlistError::Conflict(
                "Group already watched".to_string(),
            ));
        }

        list.groups.push(WatchedGroup {
            group_id: group_id.to_string(),
            display_name: display_name.to_string(),
        });
        info!(owner, group_id, "Watching group");

        self.save(owner, &mut list)?;
        Ok(list)
    }

    pub fn delete_watched_group(&self, owner: &str, group_id: &str) -> WatchlistResult<WatchedList> {
        let mut list = self.get(owner)?;

        let index = list
            .groups
            .iter()
            .position(|g| g.group_id == group_id)
            .ok_or_else(|| WatchlistError::NotFound("Group not found".to_string()))?;
        list.groups.remove(index);
        info!(owner, group_id, "Stopped watching group");

        self.save(owner, &mut list)?;
        Ok(list)
    }
}
