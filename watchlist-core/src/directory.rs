//! User/group directory and presence collaborators.
//!
//! The service only ever talks to these through the [`Directory`] and
//! [`PresenceSource`] traits. [`MemoryDirectory`] implements both and can be
//! seeded from a JSON fixture.

use std::path::Path;

use dashmap::DashMap;
use serde::Deserialize;
use tracing::info;

use crate::error::{WatchlistError, WatchlistResult};
use crate::models::{GroupRecord, GroupSource, PresenceStatus, StatusRecord, UserProfile};

pub trait Directory: Send + Sync {
    /// Profiles for the given ids; unknown ids are simply absent from the result.
    fn get_users_by_ids(&self, user_ids: &[String]) -> WatchlistResult<Vec<UserProfile>>;

    fn get_group(&self, group_id: &str) -> WatchlistResult<Option<GroupRecord>>;

    /// One page of member ids. Fails with `NotFound` for an unknown group.
    fn get_group_member_ids(
        &self,
        group_id: &str,
        page: usize,
        per_page: usize,
    ) -> WatchlistResult<Vec<String>>;

    fn get_groups_by_source(&self, source: GroupSource) -> WatchlistResult<Vec<GroupRecord>>;
}

pub trait PresenceSource: Send + Sync {
    /// Presence for the given ids; users without a record are absent.
    fn get_statuses_by_ids(&self, user_ids: &[String]) -> WatchlistResult<Vec<StatusRecord>>;
}

/// Group entry of a directory fixture.
#[derive(Debug, Deserialize)]
pub struct SeedGroup {
    #[serde(flatten)]
    pub group: GroupRecord,
    #[serde(default)]
    pub member_ids: Vec<String>,
}

/// JSON fixture accepted by [`MemoryDirectory::from_seed_file`].
#[derive(Debug, Default, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub groups: Vec<SeedGroup>,
    #[serde(default)]
    pub statuses: Vec<StatusRecord>,
}

/// In-process directory and presence table.
#[derive(Default)]
pub struct MemoryDirectory {
    users: DashMap<String, UserProfile>,
    groups: DashMap<String, GroupRecord>,
    /// group_id -> member ids in membership order
    members: DashMap<String, Vec<String>>,
    statuses: DashMap<String, StatusRecord>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: DirectorySeed) -> Self {
        let directory = Self::new();
        for user in seed.users {
            directory.upsert_user(user);
        }
        for SeedGroup { group, member_ids } in seed.groups {
            directory.upsert_group(group, member_ids);
        }
        for status in seed.statuses {
            directory.statuses.insert(status.user_id.clone(), status);
        }
        directory
    }

    pub fn from_seed_file(path: &Path) -> WatchlistResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WatchlistError::Upstream(format!("{}: {}", path.display(), e)))?;
        let seed: DirectorySeed = serde_json::from_str(&contents)?;
        info!(
            users = seed.users.len(),
            groups = seed.groups.len(),
            statuses = seed.statuses.len(),
            "Loaded directory seed from {}",
            path.display()
        );
        Ok(Self::from_seed(seed))
    }

    pub fn upsert_user(&self, user: UserProfile) {
        self.users.insert(user.id.clone(), user);
    }

    /// Insert or replace a group together with its full member list.
    pub fn upsert_group(&self, mut group: GroupRecord, member_ids: Vec<String>) {
        group.member_count = Some(member_ids.len() as i64);
        self.members.insert(group.id.clone(), member_ids);
        self.groups.insert(group.id.clone(), group);
    }

    /// Drop a group entirely, as if it had been purged from the directory.
    pub fn remove_group(&self, group_id: &str) {
        self.groups.remove(group_id);
        self.members.remove(group_id);
    }

    pub fn set_status(&self, user_id: &str, status: PresenceStatus) {
        self.statuses.insert(
            user_id.to_string(),
            StatusRecord {
                user_id: user_id.to_string(),
                status,
                last_activity_at: chrono::Utc::now().timestamp_millis(),
            },
        );
    }
}

impl Directory for MemoryDirectory {
    fn get_users_by_ids(&self, user_ids: &[String]) -> WatchlistResult<Vec<UserProfile>> {
        Ok(user_ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| u.value().clone()))
            .collect())
    }

    fn get_group(&self, group_id: &str) -> WatchlistResult<Option<GroupRecord>> {
        Ok(self.groups.get(group_id).map(|g| g.value().clone()))
    }

    fn get_group_member_ids(
        &self,
        group_id: &str,
        page: usize,
        per_page: usize,
    ) -> WatchlistResult<Vec<String>> {
        let members = self
            .members
            .get(group_id)
            .ok_or_else(|| WatchlistError::NotFound("Group not found".to_string()))?;
        Ok(members
            .iter()
            .skip(page.saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect())
    }

    fn get_groups_by_source(&self, source: GroupSource) -> WatchlistResult<Vec<GroupRecord>> {
        let mut groups: Vec<GroupRecord> = self
            .groups
            .iter()
            .filter(|g| g.source == source)
            .map(|g| g.value().clone())
            .collect();
        groups.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(groups)
    }
}

impl PresenceSource for MemoryDirectory {
    fn get_statuses_by_ids(&self, user_ids: &[String]) -> WatchlistResult<Vec<StatusRecord>> {
        Ok(user_ids
            .iter()
            .filter_map(|id| self.statuses.get(id).map(|s| s.value().clone()))
            .collect())
    }
}
