//! Error handling for the HTTP layer

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Entity or result set treated as absent. Rendered as an empty 404.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// A write against the store failed. Rendered as 400; the store's message
    /// is only sent back when `expose` is set.
    #[error("persistence failure: {source}")]
    Persistence {
        #[source]
        source: anyhow::Error,
        expose: bool,
    },

    /// The request could not be extracted (body, path or query). Rendered as
    /// 400; the message is only sent back when `expose` is set.
    #[error("bad request: {message}")]
    BadRequest { message: String, expose: bool },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a persistence error whose detail stays server-side
    pub fn persistence(source: impl Into<anyhow::Error>) -> Self {
        Self::Persistence {
            source: source.into(),
            expose: false,
        }
    }

    /// Create a persistence error that echoes the store's message to the client
    pub fn persistence_exposed(source: impl Into<anyhow::Error>) -> Self {
        Self::Persistence {
            source: source.into(),
            expose: true,
        }
    }

    /// Create a malformed-input error with an empty body
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            expose: false,
        }
    }

    /// Create a malformed-input error that echoes `message` as plain text
    pub fn bad_request_exposed(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            expose: true,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { resource } => {
                tracing::debug!(%resource, "resource not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Persistence { source, expose } => {
                tracing::warn!(error = %format!("{source:#}"), exposed = expose, "persistence failure");
                if expose {
                    plain_text_bad_request(root_message(&source))
                } else {
                    StatusCode::BAD_REQUEST.into_response()
                }
            }
            AppError::BadRequest { message, expose } => {
                tracing::debug!(%message, exposed = expose, "malformed request");
                if expose {
                    plain_text_bad_request(message)
                } else {
                    StatusCode::BAD_REQUEST.into_response()
                }
            }
            AppError::Internal(e) => {
                let error_id = Uuid::now_v7();
                let timestamp = OffsetDateTime::now_utc().to_string();

                tracing::error!(
                    error_id = %error_id,
                    error = %format!("{e:#}"),
                    "request error"
                );

                let message = if cfg!(not(debug_assertions)) {
                    "An internal server error occurred".to_string()
                } else {
                    format!("{e:#}")
                };

                let body = json!({
                    "error": {
                        "code": "internal_error",
                        "message": message,
                        "details": [],
                        "trace_id": error_id.to_string(),
                        "timestamp": timestamp
                    }
                });

                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

fn plain_text_bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}

/// The innermost cause, which for store failures is the driver's own message.
fn root_message(error: &anyhow::Error) -> String {
    error.root_cause().to_string()
}
