//! Folder and watchlist validation rules.
//!
//! Group uniqueness and existence are not checked here; only the dedicated
//! add-group path enforces them.

use crate::error::{WatchlistError, WatchlistResult};
use crate::models::watchlist::{WatchedList, MAX_FOLDERS, MAX_WATCHED_GROUPS};

pub const MAX_FOLDER_NAME_LENGTH: usize = 64;

/// Validate a folder name and return its trimmed form.
pub fn validate_folder_name(raw: &str) -> WatchlistResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(WatchlistError::Validation(
            "Folder name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LENGTH {
        return Err(WatchlistError::Validation(format!(
            "Folder name too long (max {} characters)",
            MAX_FOLDER_NAME_LENGTH
        )));
    }
    // Tab is the only control character allowed
    if name.chars().any(|c| (c as u32) < 32 && c != '\t') {
        return Err(WatchlistError::Validation(
            "Folder name contains invalid characters".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Validate a full watchlist before it is persisted, normalizing folder
/// names in place.
pub fn validate_watched_list(list: &mut WatchedList) -> WatchlistResult<()> {
    if list.folders.len() > MAX_FOLDERS {
        return Err(WatchlistError::Validation(format!(
            "Too many folders (max {})",
            MAX_FOLDERS
        )));
    }
    if list.groups.len() > MAX_WATCHED_GROUPS {
        return Err(WatchlistError::Validation(format!(
            "Too many watched groups (max {})",
            MAX_WATCHED_GROUPS
        )));
    }
    for folder in list.folders.iter_mut() {
        if folder.id.is_empty() {
            return Err(WatchlistError::Validation(
                "Folder id cannot be empty".to_string(),
            ));
        }
        folder.name = validate_folder_name(&folder.name)?;
    }
    Ok(())
}
