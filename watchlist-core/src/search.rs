use crate::directory::Directory;
use crate::error::WatchlistResult;
use crate::models::{GroupInfo, GroupSource};

/// Search custom directory groups by name or display name.
///
/// Deleted groups are skipped. A blank term lists every group; otherwise the
/// term must be a case-insensitive substring of either name.
pub fn search_groups(directory: &dyn Directory, term: &str) -> WatchlistResult<Vec<GroupInfo>> {
    let term = term.trim().to_lowercase();

    let groups = directory.get_groups_by_source(GroupSource::Custom)?;
    Ok(groups
        .iter()
        .filter(|g| g.delete_at == 0)
        .filter(|g| {
            term.is_empty()
                || g.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&term))
                || g.display_name.to_lowercase().contains(&term)
        })
        .map(GroupInfo::from)
        .collect())
}
