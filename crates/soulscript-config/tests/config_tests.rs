// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Soulscript configuration system.

use soulscript_config::diagnostic::{ConfigError, suggest_key};
use soulscript_config::model::SoulscriptConfig;
use soulscript_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_soulscript_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 9090
log_level = "debug"

[auth]
token_secret = "a-long-enough-secret-value"
token_ttl_days = 7

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[classifier]
base_url = "http://model-host:5000"
probe_timeout_secs = 2
request_timeout_secs = 8

[email]
smtp_host = "smtp.gmail.com"
smtp_port = 465
username = "alerts@example.com"
password = "app-password"
from = "Soulscript Support <alerts@example.com>"

[sms]
account_sid = "AC123"
auth_token = "tok"
from_number = "+15551230000"

[alerts]
queue_depth = 128
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(
        config.auth.token_secret.as_deref(),
        Some("a-long-enough-secret-value")
    );
    assert_eq!(config.auth.token_ttl_days, 7);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.classifier.base_url, "http://model-host:5000");
    assert_eq!(config.classifier.probe_timeout_secs, 2);
    assert_eq!(config.classifier.request_timeout_secs, 8);
    assert_eq!(config.email.smtp_host.as_deref(), Some("smtp.gmail.com"));
    assert_eq!(config.email.smtp_port, 465);
    assert_eq!(config.sms.account_sid.as_deref(), Some("AC123"));
    assert_eq!(config.sms.from_number.as_deref(), Some("+15551230000"));
    assert_eq!(config.alerts.queue_depth, 128);
}

/// Unknown field in a section produces an error mentioning the bad key.
#[test]
fn unknown_field_in_classifier_produces_error() {
    let toml = r#"
[classifier]
base_uri = "http://localhost:5000"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_uri"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "info");
    assert!(config.auth.token_secret.is_none());
    assert_eq!(config.auth.token_ttl_days, 30);
    assert!(config.storage.wal_mode);
    assert_eq!(config.classifier.base_url, "http://localhost:5000");
    assert_eq!(config.classifier.probe_timeout_secs, 3);
    assert_eq!(config.classifier.request_timeout_secs, 5);
    assert!(config.email.smtp_host.is_none());
    assert!(config.sms.account_sid.is_none());
    assert_eq!(config.alerts.queue_depth, 64);
}

/// Env-style override (dot notation) replaces a TOML value.
#[test]
fn env_override_replaces_toml_value() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[server]
host = "from-toml"
"#;

    let config: SoulscriptConfig = Figment::new()
        .merge(Serialized::defaults(SoulscriptConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("server.host", "envtest"))
        .extract()
        .expect("should merge env override");

    assert_eq!(config.server.host, "envtest");
}

/// SOULSCRIPT_AUTH_TOKEN_SECRET must map to auth.token_secret, not
/// auth.token.secret.
#[test]
fn env_override_maps_underscore_keys() {
    use figment::{Figment, providers::Serialized};

    let config: SoulscriptConfig = Figment::new()
        .merge(Serialized::defaults(SoulscriptConfig::default()))
        .merge(("auth.token_secret", "secret-from-env-long"))
        .extract()
        .expect("should set token_secret via dot notation");

    assert_eq!(
        config.auth.token_secret.as_deref(),
        Some("secret-from-env-long")
    );
}

/// load_and_validate_str rejects semantically invalid values.
#[test]
fn validation_rejects_zero_queue_depth() {
    let toml = r#"
[alerts]
queue_depth = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("queue_depth"))
    ));
}

/// The fuzzy matcher suggests the intended key for a close typo.
#[test]
fn typo_suggestion_for_close_key() {
    let valid = &["smtp_host", "smtp_port", "username", "password", "from"];
    assert_eq!(suggest_key("smtp_host_", valid), Some("smtp_host".to_string()));
}
