//! Status snapshot for a whole watchlist.
//!
//! All ids referenced by any bucket are collected once, presence and profiles
//! are fetched with one batch call each, and the results are redistributed to
//! the uncategorized list, the folders and the groups in watchlist order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::directory::{Directory, PresenceSource};
use crate::error::WatchlistResult;
use crate::models::directory::CUSTOM_STATUS_PROP;
use crate::models::{
    FolderWithStatuses, GroupWithStatuses, StatusResponse, UserProfile, UserStatusInfo,
    WatchedList,
};
use crate::resolver::{MembershipResolver, ResolvedGroup};

pub struct StatusAggregator {
    directory: Arc<dyn Directory>,
    presence: Arc<dyn PresenceSource>,
    resolver: MembershipResolver,
}

impl StatusAggregator {
    pub fn new(directory: Arc<dyn Directory>, presence: Arc<dyn PresenceSource>) -> Self {
        Self {
            resolver: MembershipResolver::new(directory.clone()),
            directory,
            presence,
        }
    }

    pub fn snapshot(&self, list: &WatchedList) -> WatchlistResult<StatusResponse> {
        let resolved = self.resolver.resolve(&list.groups);

        let all_ids = collect_ids(list, &resolved);
        if all_ids.is_empty() {
            return Ok(StatusResponse::default());
        }

        let statuses = self.presence.get_statuses_by_ids(&all_ids)?;
        let profiles = self.directory.get_users_by_ids(&all_ids)?;
        debug!(
            requested = all_ids.len(),
            statuses = statuses.len(),
            profiles = profiles.len(),
            "Fetched watchlist statuses"
        );

        let mut infos: HashMap<String, UserStatusInfo> = statuses
            .into_iter()
            .map(|s| {
                let info = UserStatusInfo {
                    user_id: s.user_id.clone(),
                    status: s.status,
                    last_activity_at: s.last_activity_at,
                    ..Default::default()
                };
                (s.user_id, info)
            })
            .collect();
        for profile in &profiles {
            let info = infos
                .entry(profile.id.clone())
                .or_insert_with(|| UserStatusInfo::offline(&profile.id));
            apply_profile(info, profile);
        }

        Ok(StatusResponse {
            uncategorized: bucket(&infos, &list.user_ids),
            folders: list
                .folders
                .iter()
                .map(|f| FolderWithStatuses {
                    id: f.id.clone(),
                    name: f.name.clone(),
                    users: bucket(&infos, &f.user_ids),
                })
                .collect(),
            groups: list
                .groups
                .iter()
                .zip(&resolved)
                .map(|(g, members)| GroupWithStatuses {
                    group_id: g.group_id.clone(),
                    display_name: g.display_name.clone(),
                    users: bucket(&infos, &members.user_ids),
                })
                .collect(),
        })
    }
}

/// Every referenced id once, in first-seen order.
fn collect_ids(list: &WatchedList, resolved: &[ResolvedGroup]) -> Vec<String> {
    let mut seen = HashSet::new();
    list.user_ids
        .iter()
        .chain(list.folders.iter().flat_map(|f| f.user_ids.iter()))
        .chain(resolved.iter().flat_map(|g| g.user_ids.iter()))
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

fn bucket(infos: &HashMap<String, UserStatusInfo>, ids: &[String]) -> Vec<UserStatusInfo> {
    ids.iter()
        .map(|id| {
            infos
                .get(id)
                .cloned()
                .unwrap_or_else(|| UserStatusInfo::offline(id))
        })
        .collect()
}

fn apply_profile(info: &mut UserStatusInfo, profile: &UserProfile) {
    info.username = profile.username.clone();
    info.first_name = profile.first_name.clone();
    info.last_name = profile.last_name.clone();
    info.nickname = profile.nickname.clone();

    let Some(raw) = profile.props.get(CUSTOM_STATUS_PROP).filter(|s| !s.is_empty()) else {
        return;
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(custom) => {
            if let Some(text) = custom.get("text").and_then(Value::as_str) {
                info.custom_status = text.to_string();
            }
            if let Some(emoji) = custom.get("emoji").and_then(Value::as_str) {
                info.custom_emoji = emoji.to_string();
            }
        }
        Err(e) => {
            debug!(user_id = %profile.id, error = %e, "Ignoring unparseable custom status");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::directory::MemoryDirectory;
    use crate::error::WatchlistError;
    use crate::models::{
        Folder, GroupRecord, GroupSource, PresenceStatus, StatusRecord, WatchedGroup,
    };

    /// Wraps a directory and counts every collaborator call.
    #[derive(Default)]
    struct CountingDirectory {
        inner: MemoryDirectory,
        calls: AtomicUsize,
        fail_presence: bool,
    }

    impl CountingDirectory {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Directory for CountingDirectory {
        fn get_users_by_ids(&self, ids: &[String]) -> WatchlistResult<Vec<UserProfile>> {
            self.hit();
            self.inner.get_users_by_ids(ids)
        }

        fn get_group(&self, group_id: &str) -> WatchlistResult<Option<GroupRecord>> {
            self.hit();
            self.inner.get_group(group_id)
        }

        fn get_group_member_ids(
            &self,
            group_id: &str,
            page: usize,
            per_page: usize,
        ) -> WatchlistResult<Vec<String>> {
            self.hit();
            self.inner.get_group_member_ids(group_id, page, per_page)
        }

        fn get_groups_by_source(&self, source: GroupSource) -> WatchlistResult<Vec<GroupRecord>> {
            self.hit();
            self.inner.get_groups_by_source(source)
        }
    }

    impl PresenceSource for CountingDirectory {
        fn get_statuses_by_ids(&self, ids: &[String]) -> WatchlistResult<Vec<StatusRecord>> {
            self.hit();
            if self.fail_presence {
                return Err(WatchlistError::Upstream("presence unavailable".to_string()));
            }
            self.inner.get_statuses_by_ids(ids)
        }
    }

    fn aggregator(directory: &Arc<CountingDirectory>) -> StatusAggregator {
        StatusAggregator::new(directory.clone(), directory.clone())
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn user(id: &str, custom_status: Option<&str>) -> UserProfile {
        let mut profile = UserProfile {
            id: id.to_string(),
            username: format!("{id}_name"),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            nickname: "Nick".to_string(),
            ..Default::default()
        };
        if let Some(raw) = custom_status {
            profile
                .props
                .insert(CUSTOM_STATUS_PROP.to_string(), raw.to_string());
        }
        profile
    }

    fn status(id: &str, status: PresenceStatus, last_activity_at: i64) -> StatusRecord {
        StatusRecord {
            user_id: id.to_string(),
            status,
            last_activity_at,
        }
    }

    fn seeded(directory: MemoryDirectory) -> Arc<CountingDirectory> {
        Arc::new(CountingDirectory {
            inner: directory,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_watchlist_makes_no_calls() {
        let directory = Arc::new(CountingDirectory::default());
        let response = aggregator(&directory).snapshot(&WatchedList::empty()).unwrap();

        assert_eq!(response, StatusResponse::default());
        assert_eq!(directory.calls(), 0);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["uncategorized"], serde_json::json!([]));
        assert_eq!(json["folders"], serde_json::json!([]));
        assert_eq!(json["groups"], serde_json::json!([]));
    }

    #[test]
    fn test_user_without_presence_is_offline() {
        let directory = Arc::new(CountingDirectory::default());
        let mut list = WatchedList::empty();
        list.folders.push(Folder {
            id: "f1".to_string(),
            name: "Team".to_string(),
            user_ids: ids(&["X"]),
        });

        let response = aggregator(&directory).snapshot(&list).unwrap();
        assert!(response.uncategorized.is_empty());
        assert!(response.groups.is_empty());
        assert_eq!(response.folders.len(), 1);
        assert_eq!(response.folders[0].id, "f1");
        assert_eq!(response.folders[0].name, "Team");

        let x = &response.folders[0].users[0];
        assert_eq!(x.user_id, "X");
        assert_eq!(x.status, PresenceStatus::Offline);
        assert_eq!(x.last_activity_at, 0);
        assert_eq!(x.custom_status, "");
        assert_eq!(x.custom_emoji, "");
        // one presence batch and one profile batch
        assert_eq!(directory.calls(), 2);
    }

    #[test]
    fn test_buckets_keep_watchlist_order() {
        let inner = MemoryDirectory::new();
        inner.upsert_group(
            GroupRecord {
                id: "g1".to_string(),
                ..Default::default()
            },
            ids(&["m2", "m1", "a"]),
        );
        inner.upsert_user(user("a", None));
        let directory = seeded(inner);

        let mut list = WatchedList::with_user_ids(ids(&["c", "a", "b"]));
        list.folders.push(Folder {
            id: "f2".to_string(),
            name: "Second".to_string(),
            user_ids: ids(&["b", "a"]),
        });
        list.folders.push(Folder {
            id: "f1".to_string(),
            name: "First".to_string(),
            user_ids: Vec::new(),
        });
        list.groups.push(WatchedGroup {
            group_id: "g1".to_string(),
            display_name: "Group".to_string(),
        });

        let response = aggregator(&directory).snapshot(&list).unwrap();
        fn order(users: &[UserStatusInfo]) -> Vec<String> {
            users.iter().map(|u| u.user_id.clone()).collect()
        }

        assert_eq!(order(&response.uncategorized), ids(&["c", "a", "b"]));
        assert_eq!(response.folders[0].id, "f2");
        assert_eq!(order(&response.folders[0].users), ids(&["b", "a"]));
        assert_eq!(response.folders[1].id, "f1");
        assert!(response.folders[1].users.is_empty());
        assert_eq!(response.groups[0].display_name, "Group");
        assert_eq!(order(&response.groups[0].users), ids(&["m2", "m1", "a"]));

        // The same user carries the same data in every bucket
        assert_eq!(response.uncategorized[1], response.folders[0].users[1]);
        assert_eq!(response.uncategorized[1].username, "a_name");
    }

    #[test]
    fn test_union_is_fetched_once() {
        let list = {
            let mut list = WatchedList::with_user_ids(ids(&["a", "b", "a"]));
            list.folders.push(Folder {
                id: "f".to_string(),
                name: "F".to_string(),
                user_ids: ids(&["b", "c"]),
            });
            list
        };
        let resolved = vec![ResolvedGroup {
            group_id: "g".to_string(),
            user_ids: ids(&["c", "d"]),
        }];
        assert_eq!(collect_ids(&list, &resolved), ids(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_presence_and_profile_overlay() {
        let inner = MemoryDirectory::new();
        inner.upsert_user(user("u1", Some(r#"{"text":"In a meeting","emoji":"calendar"}"#)));
        let directory = seeded(inner);
        directory.inner.set_status("u1", PresenceStatus::Dnd);

        let response = aggregator(&directory)
            .snapshot(&WatchedList::with_user_ids(ids(&["u1"])))
            .unwrap();
        let info = &response.uncategorized[0];

        assert_eq!(info.status, PresenceStatus::Dnd);
        assert!(info.last_activity_at > 0);
        assert_eq!(info.username, "u1_name");
        assert_eq!(info.first_name, "First");
        assert_eq!(info.last_name, "Last");
        assert_eq!(info.nickname, "Nick");
        assert_eq!(info.custom_status, "In a meeting");
        assert_eq!(info.custom_emoji, "calendar");
    }

    #[test]
    fn test_bad_custom_status_is_ignored() {
        let inner = MemoryDirectory::new();
        inner.upsert_user(user("broken", Some("{not json")));
        inner.upsert_user(user("typed", Some(r#"{"text":42,"emoji":"wave"}"#)));
        inner.upsert_user(user("empty", Some("")));
        let directory = seeded(inner);

        let response = aggregator(&directory)
            .snapshot(&WatchedList::with_user_ids(ids(&["broken", "typed", "empty"])))
            .unwrap();

        assert_eq!(response.uncategorized[0].username, "broken_name");
        assert_eq!(response.uncategorized[0].custom_status, "");
        assert_eq!(response.uncategorized[0].custom_emoji, "");
        assert_eq!(response.uncategorized[1].custom_status, "");
        assert_eq!(response.uncategorized[1].custom_emoji, "wave");
        assert_eq!(response.uncategorized[2].custom_status, "");
    }

    #[test]
    fn test_deleted_group_shows_no_members() {
        let directory = Arc::new(CountingDirectory::default());
        let mut list = WatchedList::with_user_ids(ids(&["u1"]));
        list.groups.push(WatchedGroup {
            group_id: "gone".to_string(),
            display_name: "Gone".to_string(),
        });

        let response = aggregator(&directory).snapshot(&list).unwrap();
        assert_eq!(response.groups.len(), 1);
        assert_eq!(response.groups[0].group_id, "gone");
        assert!(response.groups[0].users.is_empty());
        assert_eq!(response.uncategorized.len(), 1);
    }

    #[test]
    fn test_only_empty_buckets_short_circuit() {
        let directory = Arc::new(CountingDirectory::default());
        let mut list = WatchedList::empty();
        list.folders.push(Folder {
            id: "f1".to_string(),
            name: "Empty".to_string(),
            user_ids: Vec::new(),
        });
        list.groups.push(WatchedGroup {
            group_id: "gone".to_string(),
            display_name: String::new(),
        });

        let response = aggregator(&directory).snapshot(&list).unwrap();
        assert_eq!(response, StatusResponse::default());
        // only the member lookup for the watched group
        assert_eq!(directory.calls(), 1);
    }

    #[test]
    fn test_presence_failure_fails_the_snapshot() {
        let directory = Arc::new(CountingDirectory {
            fail_presence: true,
            ..Default::default()
        });
        let err = aggregator(&directory)
            .snapshot(&WatchedList::with_user_ids(ids(&["u1"])))
            .unwrap_err();
        assert!(matches!(err, WatchlistError::Upstream(_)));
    }

    #[test]
    fn test_status_uses_lowercase_wire_names() {
        let info = UserStatusInfo::offline("u1");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["status"], "offline");
        assert_eq!(
            serde_json::to_value(PresenceStatus::Dnd).unwrap(),
            serde_json::json!("dnd")
        );
    }
}
