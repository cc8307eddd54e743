// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Soulscript platform.

use thiserror::Error;

/// The primary error type used across all Soulscript crates.
#[derive(Debug, Error)]
pub enum SoulscriptError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Classification service errors (connection failure, bad payload).
    ///
    /// These never reach a request handler -- the classifier recovers locally
    /// with a fallback prediction -- but the probe and transport layers still
    /// report them for logging.
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Notification channel errors (SMTP failure, SMS provider rejection).
    #[error("notification error: {message}")]
    Notify {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication or credential errors.
    #[error("auth error: {0}")]
    Auth(String),

    /// A request referenced an entity that does not exist or is not visible
    /// to the caller.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// User-supplied data failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_render() {
        let not_found = SoulscriptError::NotFound {
            kind: "journal entry",
            id: "abc".into(),
        };
        assert_eq!(not_found.to_string(), "journal entry not found: abc");

        let validation = SoulscriptError::Validation("mood is required".into());
        assert!(validation.to_string().contains("mood is required"));
    }
}
