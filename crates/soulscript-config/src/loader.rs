// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./soulscript.toml` > `~/.config/soulscript/soulscript.toml`
//! > `/etc/soulscript/soulscript.toml` with environment variable overrides via
//! `SOULSCRIPT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SoulscriptConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/soulscript/soulscript.toml` (system-wide)
/// 3. `~/.config/soulscript/soulscript.toml` (user XDG config)
/// 4. `./soulscript.toml` (local directory)
/// 5. `SOULSCRIPT_*` environment variables
pub fn load_config() -> Result<SoulscriptConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SoulscriptConfig::default()))
        .merge(Toml::file("/etc/soulscript/soulscript.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("soulscript/soulscript.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("soulscript.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for callers that supply config inline.
pub fn load_config_from_str(toml_content: &str) -> Result<SoulscriptConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SoulscriptConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SoulscriptConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SoulscriptConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SOULSCRIPT_AUTH_TOKEN_SECRET` must map
/// to `auth.token_secret`, not `auth.token.secret`.
fn env_provider() -> Env {
    Env::prefixed("SOULSCRIPT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SOULSCRIPT_AUTH_TOKEN_SECRET -> "auth_token_secret"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("email_", "email.", 1)
            .replacen("sms_", "sms.", 1)
            .replacen("alerts_", "alerts.", 1);
        mapped.into()
    })
}
