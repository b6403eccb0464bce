// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the client pipeline and the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Errors surfaced by the authenticated API client.
///
/// Transport failures carry the underlying `reqwest` error untouched; non-2xx
/// responses keep the upstream status and raw body so callers can pass them
/// through unchanged. The client never wraps or retries beyond the single
/// auth-refresh path.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("platform returned {status}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode platform response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// The authorization-failure status that drives the refresh path.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            ClientError::Decode(_) => None,
        }
    }
}

/// Gateway error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Platform API returned {status}")]
    Upstream { status: StatusCode, body: String },

    #[error("Platform API unreachable: {0}")]
    Gateway(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, body } => AppError::Upstream { status, body },
            ClientError::Transport(err) => AppError::Gateway(err.to_string()),
            ClientError::Decode(err) => AppError::Gateway(format!("bad platform payload: {err}")),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg)),
            AppError::Upstream { status, body } => {
                // Pass the platform's status through; re-case JSON bodies for
                // the frontend, forward anything else verbatim.
                return match serde_json::from_str::<Value>(&body) {
                    Ok(json) => (status, Json(crate::casing::to_app_format(json))).into_response(),
                    Err(_) => (status, body).into_response(),
                };
            }
            AppError::Gateway(msg) => {
                tracing::error!(error = %msg, "Platform API unreachable");
                (StatusCode::BAD_GATEWAY, "platform_unreachable", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
