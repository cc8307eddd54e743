// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API error responses.
//!
//! Every failure leaves the server as `{"success": false, "message": ...}`
//! with an appropriate status code. Internal details are logged, never
//! returned to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use soulscript_core::SoulscriptError;
use tracing::error;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<SoulscriptError> for ApiError {
    fn from(e: SoulscriptError) -> Self {
        match e {
            SoulscriptError::Validation(message) => Self::bad_request(message),
            SoulscriptError::Auth(message) => Self::unauthorized(message),
            SoulscriptError::NotFound { kind, .. } => Self::not_found(format!("{kind} not found")),
            other => {
                error!(error = %other, "internal error handling request");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "success": false,
                "message": self.message,
            })),
        )
            .into_response()
    }
}
