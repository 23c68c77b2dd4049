//! Startup configuration and reloadable runtime settings.
//!
//! [`Config`] is read once at startup. [`Settings`] is an immutable value
//! published through a `watch` channel; a reload replaces it wholesale and
//! request handlers always read the latest value.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

pub const DEFAULT_ADDR: &str = "0.0.0.0:9001";
pub const DEFAULT_DB_PATH: &str = "watchlist.db";
/// `WATCHLIST_DB_PATH` value selecting the in-process store.
pub const MEMORY_DB: &str = ":memory:";

const ACCESS_TOKEN_VAR: &str = "WATCHLIST_ACCESS_TOKEN";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: String,
    pub directory_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_var("WATCHLIST_SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            db_path: env_var("WATCHLIST_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            directory_file: env_var("WATCHLIST_DIRECTORY_FILE").map(PathBuf::from),
            log_dir: env_var("WATCHLIST_LOG_DIR").map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Bearer token every API request must present, when set.
    pub access_token: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            access_token: env_var(ACCESS_TOKEN_VAR),
        }
    }

    fn from_entries<I>(entries: I) -> Result<Self, dotenvy::Error>
    where
        I: Iterator<Item = dotenvy::Result<(String, String)>>,
    {
        let vars = entries.collect::<Result<HashMap<String, String>, _>>()?;
        Ok(Self {
            access_token: vars
                .get(ACCESS_TOKEN_VAR)
                .filter(|v| !v.trim().is_empty())
                .cloned(),
        })
    }

    /// Settings described by a single env file. Keys the file does not set
    /// are unset.
    pub fn from_file(path: &Path) -> Result<Self, dotenvy::Error> {
        Self::from_entries(dotenvy::from_path_iter(path)?)
    }

    /// Current settings. A `.env` file, when one is found, is authoritative:
    /// removing a key from it unsets that setting even though the process
    /// environment may still hold the value loaded at startup. Without a
    /// `.env` file the process environment is used.
    pub fn load() -> Result<Self, dotenvy::Error> {
        match dotenvy::dotenv_iter() {
            Ok(entries) => Self::from_entries(entries),
            Err(e) if e.not_found() => Ok(Self::from_env()),
            Err(e) => Err(e),
        }
    }
}

pub type SettingsReceiver = watch::Receiver<Arc<Settings>>;

pub fn settings_channel(initial: Settings) -> (watch::Sender<Arc<Settings>>, SettingsReceiver) {
    watch::channel(Arc::new(initial))
}

/// Publish `next` if it differs from the current value. Returns whether
/// receivers were notified.
pub fn publish_settings(tx: &watch::Sender<Arc<Settings>>, next: Settings) -> bool {
    tx.send_if_modified(|current| {
        if **current == next {
            return false;
        }
        *current = Arc::new(next);
        true
    })
}

/// Re-read settings and publish them. A malformed `.env` is logged and the
/// current settings stay in effect.
pub fn reload_settings(tx: &watch::Sender<Arc<Settings>>) -> bool {
    match Settings::load() {
        Ok(next) => {
            let changed = publish_settings(tx, next);
            info!(changed, "Reloaded settings");
            changed
        }
        Err(e) => {
            warn!(error = %e, "Failed to reload settings; keeping current values");
            false
        }
    }
}

/// Reload settings every time the process receives SIGHUP.
#[cfg(unix)]
pub async fn reload_on_sighup(tx: watch::Sender<Arc<Settings>>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangups = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "Cannot listen for SIGHUP; settings will not reload");
            return;
        }
    };
    while hangups.recv().await.is_some() {
        reload_settings(&tx);
    }
}
