//! Caller identity extraction.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the authenticated caller's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The user a request acts for. Every watchlist operation is scoped to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub String);

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let settings = state.settings();
        if let Some(expected) = settings.access_token.as_deref() {
            let presented = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "));
            if presented != Some(expected) {
                warn!(path = %parts.uri.path(), "Rejected request with missing or invalid access token");
                return Err(ApiError::Unauthorized);
            }
        }

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        Ok(Caller(user_id.to_string()))
    }
}
