use std::sync::Arc;

use watchlist_core::{
    Directory, KvStore, MembershipResolver, PresenceSource, StatusAggregator, WatchlistStore,
};

use crate::config::{Settings, SettingsReceiver};

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WatchlistStore>,
    pub aggregator: Arc<StatusAggregator>,
    pub resolver: Arc<MembershipResolver>,
    pub directory: Arc<dyn Directory>,
    settings: SettingsReceiver,
}

impl AppState {
    pub fn new(
        kv: Arc<dyn KvStore>,
        directory: Arc<dyn Directory>,
        presence: Arc<dyn PresenceSource>,
        settings: SettingsReceiver,
    ) -> Self {
        Self {
            store: Arc::new(WatchlistStore::new(kv, directory.clone())),
            aggregator: Arc::new(StatusAggregator::new(directory.clone(), presence)),
            resolver: Arc::new(MembershipResolver::new(directory.clone())),
            directory,
            settings,
        }
    }

    /// Settings in effect right now.
    pub fn settings(&self) -> Arc<Settings> {
        self.settings.borrow().clone()
    }
}
