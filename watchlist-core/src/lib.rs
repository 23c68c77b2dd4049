//! Watchlist core: the per-user watchlist document, its schema migration,
//! validation and persistence, and the status snapshot built from it.

pub mod aggregator;
pub mod db;
pub mod directory;
pub mod error;
pub mod kv;
pub mod migrate;
pub mod models;
pub mod resolver;
pub mod search;
pub mod store;
pub mod utils;

pub use aggregator::StatusAggregator;
pub use db::SqliteKv;
pub use directory::{Directory, DirectorySeed, MemoryDirectory, PresenceSource};
pub use error::{WatchlistError, WatchlistResult};
pub use kv::{KvStore, MemoryKv};
pub use migrate::migrate;
pub use resolver::MembershipResolver;
pub use search::search_groups;
pub use store::WatchlistStore;
pub use models::{
    Folder, FolderWithStatuses, GroupInfo, GroupWithStatuses, PresenceStatus, StatusResponse,
    UserStatusInfo, WatchedGroup, WatchedList,
};
