//! Decode-time schema upgrade for stored watchlist documents.
//!
//! Stored bytes are tried against the current schema first, then against the
//! legacy flat layout `{"user_ids": [...]}`. Anything else yields an empty
//! list so a corrupt document never blocks its owner.

use serde::Deserialize;
use tracing::debug;

use crate::models::{null_as_default, WatchedList, CURRENT_SCHEMA_VERSION};

/// Layout written before folders and groups existed.
#[derive(Debug, Deserialize)]
struct LegacyWatchedUsers {
    #[serde(default, deserialize_with = "null_as_default")]
    user_ids: Vec<String>,
}

/// Produce a current-schema watchlist from whatever was stored.
pub fn migrate(raw: Option<&[u8]>) -> WatchedList {
    let Some(raw) = raw else {
        return WatchedList::empty();
    };

    match serde_json::from_slice::<WatchedList>(raw) {
        Ok(list) if list.version == CURRENT_SCHEMA_VERSION => return list,
        Ok(list) => debug!(version = list.version, "Stored watchlist is not current, trying legacy layout"),
        Err(e) => debug!(error = %e, "Stored watchlist does not match current schema"),
    }

    match serde_json::from_slice::<LegacyWatchedUsers>(raw) {
        Ok(legacy) => WatchedList::with_user_ids(legacy.user_ids),
        Err(e) => {
            debug!(error = %e, "Discarding undecodable watchlist document");
            WatchedList::empty()
        }
    }
}
