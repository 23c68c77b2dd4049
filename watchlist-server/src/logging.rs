use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "watchlist-server.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Without a log directory, human-readable logs go to stdout. With one, JSON
/// lines go to a daily rolling file and the returned guard must be held until
/// exit so buffered lines are flushed.
pub fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, String> {
    let Some(dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .try_init()
            .map_err(|e| format!("Failed to install subscriber: {}", e))?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create log directory {}: {}", dir.display(), e))?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_writer(writer)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    Ok(Some(guard))
}
