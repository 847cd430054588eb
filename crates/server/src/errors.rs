use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const INVALID_PRODUCT_ID: &str = "Invalid product ID";
pub const INVALID_PAYLOAD: &str = "Invalid request payload";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Handler-boundary error, rendered as `{"error": msg}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path parameter or request body.
    InvalidInput(&'static str),
    NotFound(&'static str),
    /// Any other data-access failure; the message reaches the client as-is.
    Repository(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInput(msg) | ApiError::NotFound(msg) => *msg,
            ApiError::Repository(msg) => msg.as_str(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => ApiError::NotFound(PRODUCT_NOT_FOUND),
            other => ApiError::Repository(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.message(), "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.message(), "request rejected");
        }
        (status, Json(serde_json::json!({"error": self.message()}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
