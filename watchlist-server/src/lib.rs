pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;

pub use auth::{Caller, USER_ID_HEADER};
pub use config::{publish_settings, settings_channel, Config, Settings};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
