use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};
use watchlist_core::WatchlistError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Core(#[from] WatchlistError),
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        debug!(error = %value, "Rejected request body");
        Self::BadRequest("invalid request body".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(WatchlistError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Core(WatchlistError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Core(WatchlistError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Core(WatchlistError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
