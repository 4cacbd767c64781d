use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid path")]
    InvalidPath { received: String },
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Database URL not configured")]
    NotConfigured,
    #[error("database connection unavailable")]
    ConnectionUnavailable,
    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("{0}")]
    MalformedBody(serde_json::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    received: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotConfigured
            | ApiError::ConnectionUnavailable
            | ApiError::DatabaseError(_)
            | ApiError::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    /// Syntax errors are a broken body; a well-formed body with a field of
    /// the wrong type is a validation failure.
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => ApiError::BadRequest(err.to_string()),
            _ => ApiError::MalformedBody(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let received = match &self {
            ApiError::InvalidPath { received } => Some(received.clone()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            received,
        });

        (status, body).into_response()
    }
}
