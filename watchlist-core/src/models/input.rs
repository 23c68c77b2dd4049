//! Input DTOs with garde validation for the HTTP handlers.
//!
//! These structs reject malformed caller input before the store is touched.

use garde::Validate;
use serde::Deserialize;

use crate::error::{WatchlistError, WatchlistResult};
use crate::utils::validation::validate_folder_name;

const MAX_SEARCH_TERM_LENGTH: usize = 200;

fn validate_folder_name_rule(value: &str, _ctx: &()) -> garde::Result {
    match validate_folder_name(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(garde::Error::new("Invalid folder name")),
    }
}

/// Body of folder create and rename requests.
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct FolderNameInput {
    #[serde(default)]
    #[garde(custom(validate_folder_name_rule))]
    pub name: String,
}

/// Body of the add-watched-group request.
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct AddWatchedGroupInput {
    #[serde(default)]
    #[garde(length(min = 1))]
    pub group_id: String,
    #[serde(default)]
    #[garde(skip)]
    pub display_name: String,
}

/// Query string of the group search endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
#[garde(context(()))]
pub struct GroupSearchInput {
    #[serde(default)]
    #[garde(length(max = MAX_SEARCH_TERM_LENGTH))]
    pub q: String,
}

/// Helper trait to convert garde validation errors into a watchlist error
pub trait ValidateExt {
    fn validate_input(&self) -> WatchlistResult<()>;
}

impl<T: Validate<Context = ()>> ValidateExt for T {
    fn validate_input(&self) -> WatchlistResult<()> {
        self.validate()
            .map_err(|e| WatchlistError::Validation(e.to_string()))
    }
}
