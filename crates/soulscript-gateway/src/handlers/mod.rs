// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the REST API.

pub mod analyze;
pub mod auth;
pub mod contacts;
pub mod health;
pub mod journal;

use chrono::{SecondsFormat, Utc};

/// Current time in the millisecond-precision RFC 3339 form used everywhere
/// in storage.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
