use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl From<rusqlite::Error> for WatchlistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Upstream(value.to_string())
    }
}

impl From<serde_json::Error> for WatchlistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Upstream(value.to_string())
    }
}

pub type WatchlistResult<T> = Result<T, WatchlistError>;
