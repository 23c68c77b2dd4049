//! Expands watched groups into concrete member lists.

use std::sync::Arc;

use tracing::warn;

use crate::directory::Directory;
use crate::error::WatchlistResult;
use crate::models::WatchedGroup;

/// Members fetched per group; larger groups are truncated.
pub const MAX_GROUP_MEMBERS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub group_id: String,
    pub user_ids: Vec<String>,
}

pub struct MembershipResolver {
    directory: Arc<dyn Directory>,
}

impl MembershipResolver {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// First page of a single group's member ids.
    pub fn members(&self, group_id: &str) -> WatchlistResult<Vec<String>> {
        self.directory
            .get_group_member_ids(group_id, 0, MAX_GROUP_MEMBERS)
    }

    /// Resolve every watched group in order. A group whose lookup fails
    /// resolves to no members; the failure is logged and not returned.
    pub fn resolve(&self, groups: &[WatchedGroup]) -> Vec<ResolvedGroup> {
        groups
            .iter()
            .map(|g| {
                let user_ids = match self.members(&g.group_id) {
                    Ok(ids) => ids,
                    Err(e) => {
                        warn!(group_id = %g.group_id, error = %e, "Group member lookup failed");
                        Vec::new()
                    }
                };
                ResolvedGroup {
                    group_id: g.group_id.clone(),
                    user_ids,
                }
            })
            .collect()
    }
}
