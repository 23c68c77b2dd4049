//! Opaque key-value storage used to persist watchlist documents.

use dashmap::DashMap;

use crate::error::WatchlistResult;

/// Byte store addressed by string keys.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> WatchlistResult<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> WatchlistResult<()>;
}

/// Process-local store, used for tests and `:memory:` deployments.
#[derive(Default)]
pub struct MemoryKv {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> WatchlistResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &[u8]) -> WatchlistResult<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
