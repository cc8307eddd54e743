// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Soulscript platform.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Soulscript configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SoulscriptConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// External sentiment-classification service settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Outbound alert email (SMTP) settings.
    #[serde(default)]
    pub email: EmailConfig,

    /// Outbound alert SMS settings.
    #[serde(default)]
    pub sms: SmsConfig,

    /// Alert worker settings.
    #[serde(default)]
    pub alerts: AlertsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HMAC secret for signing bearer tokens. `None` means the server
    /// refuses to start (fail-closed).
    #[serde(default)]
    pub token_secret: Option<String>,

    /// Token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl_days: default_token_ttl_days(),
        }
    }
}

fn default_token_ttl_days() -> u32 {
    30
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("soulscript").join("soulscript.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("soulscript.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// External sentiment-classification service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Base URL of the sentiment server.
    #[serde(default = "default_classifier_base_url")]
    pub base_url: String,

    /// Timeout for the liveness probe, in seconds.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Timeout for the actual classification request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_classifier_base_url(),
            probe_timeout_secs: default_probe_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_classifier_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    3
}

fn default_request_timeout_secs() -> u64 {
    5
}

/// Outbound alert email configuration.
///
/// The email channel is disabled unless `smtp_host`, `username`, `password`,
/// and `from` are all present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// SMTP relay hostname. `None` disables the email channel.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password (app password for Gmail-style relays).
    #[serde(default)]
    pub password: Option<String>,

    /// From address for alert mail, e.g. `Soulscript Support <alerts@example.com>`.
    #[serde(default)]
    pub from: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from: None,
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

/// Outbound alert SMS configuration.
///
/// The SMS channel is disabled unless `account_sid`, `auth_token`, and
/// `from_number` are all present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SmsConfig {
    /// Base URL of the SMS provider API.
    #[serde(default = "default_sms_api_base")]
    pub api_base: String,

    /// Provider account identifier. `None` disables the SMS channel.
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Provider auth token.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Sender phone number in E.164 format.
    #[serde(default)]
    pub from_number: Option<String>,

    /// Timeout for a single send request, in seconds.
    #[serde(default = "default_sms_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            api_base: default_sms_api_base(),
            account_sid: None,
            auth_token: None,
            from_number: None,
            request_timeout_secs: default_sms_timeout_secs(),
        }
    }
}

fn default_sms_api_base() -> String {
    "https://api.twilio.com".to_string()
}

fn default_sms_timeout_secs() -> u64 {
    10
}

/// Alert worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AlertsConfig {
    /// Capacity of the bounded alert job queue. When the queue is full,
    /// new jobs are dropped with a warning (best-effort delivery).
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            queue_depth: default_queue_depth(),
        }
    }
}

fn default_queue_depth() -> usize {
    64
}
