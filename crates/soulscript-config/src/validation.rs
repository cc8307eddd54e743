// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths, sane timeouts, and a usable token
//! secret.

use crate::diagnostic::ConfigError;
use crate::model::SoulscriptConfig;

/// Minimum length for the token-signing secret. Shorter secrets make the
/// HMAC trivially brute-forceable.
const MIN_TOKEN_SECRET_LEN: usize = 16;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SoulscriptConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate host is not empty and looks like an IP or hostname.
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate database_path is not empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate token secret length when configured.
    if let Some(ref secret) = config.auth.token_secret
        && secret.len() < MIN_TOKEN_SECRET_LEN
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.token_secret must be at least {MIN_TOKEN_SECRET_LEN} characters, got {}",
                secret.len()
            ),
        });
    }

    if config.auth.token_ttl_days == 0 {
        errors.push(ConfigError::Validation {
            message: "auth.token_ttl_days must be at least 1".to_string(),
        });
    }

    // Validate classifier settings.
    if config.classifier.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.base_url must not be empty".to_string(),
        });
    }
    if config.classifier.probe_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "classifier.probe_timeout_secs must be at least 1".to_string(),
        });
    }
    if config.classifier.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "classifier.request_timeout_secs must be at least 1".to_string(),
        });
    }

    // The email channel requires all credentials once a host is set.
    if config.email.smtp_host.is_some() {
        for (key, value) in [
            ("email.username", &config.email.username),
            ("email.password", &config.email.password),
            ("email.from", &config.email.from),
        ] {
            if value.is_none() {
                errors.push(ConfigError::Validation {
                    message: format!("{key} is required when email.smtp_host is set"),
                });
            }
        }
    }

    // The SMS channel requires all credentials once a sid is set.
    if config.sms.account_sid.is_some() {
        for (key, value) in [
            ("sms.auth_token", &config.sms.auth_token),
            ("sms.from_number", &config.sms.from_number),
        ] {
            if value.is_none() {
                errors.push(ConfigError::Validation {
                    message: format!("{key} is required when sms.account_sid is set"),
                });
            }
        }
    }

    if config.alerts.queue_depth == 0 {
        errors.push(ConfigError::Validation {
            message: "alerts.queue_depth must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
