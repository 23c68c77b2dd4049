use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use watchlist_core::{KvStore, MemoryDirectory, MemoryKv, SqliteKv};
use watchlist_server::config::MEMORY_DB;
use watchlist_server::logging::init_tracing;
use watchlist_server::{build_router, settings_channel, AppState, Config, Settings};

fn open_kv(db_path: &str) -> Result<Arc<dyn KvStore>, String> {
    if db_path == MEMORY_DB {
        info!("Using in-memory watchlist storage");
        return Ok(Arc::new(MemoryKv::new()));
    }
    let kv = SqliteKv::open(Path::new(db_path))
        .map_err(|e| format!("Failed to open database {}: {}", db_path, e))?;
    info!("Using watchlist database at {}", db_path);
    Ok(Arc::new(kv))
}

fn open_directory(config: &Config) -> Result<Arc<MemoryDirectory>, String> {
    let directory = match &config.directory_file {
        Some(path) => MemoryDirectory::from_seed_file(path).map_err(|e| e.to_string())?,
        None => MemoryDirectory::new(),
    };
    Ok(Arc::new(directory))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    let _log_guard = match init_tracing(config.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let kv = match open_kv(&config.db_path) {
        Ok(kv) => kv,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let directory = match open_directory(&config) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to load directory: {}", e);
            std::process::exit(1);
        }
    };

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to read .env settings; using process environment");
        Settings::from_env()
    });
    let (settings_tx, settings_rx) = settings_channel(settings);
    #[cfg(unix)]
    tokio::spawn(watchlist_server::config::reload_on_sighup(settings_tx));
    #[cfg(not(unix))]
    drop(settings_tx);

    let state = AppState::new(kv, directory.clone(), directory, settings_rx);
    let app = build_router(state);

    let listener = match TcpListener::bind(&config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    info!("Watchlist server listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}
