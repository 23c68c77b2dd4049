pub mod directory;
pub mod input;
pub mod status;
pub mod watchlist;

pub use directory::{GroupInfo, GroupRecord, GroupSource, StatusRecord, UserProfile};
pub use status::{FolderWithStatuses, GroupWithStatuses, PresenceStatus, StatusResponse, UserStatusInfo};
pub use watchlist::{Folder, WatchedGroup, WatchedList, CURRENT_SCHEMA_VERSION};

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_default`] for sequences, and also turns each `null` element
/// into the element's zero value instead of failing the whole document.
pub(crate) fn null_elements_as_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}
