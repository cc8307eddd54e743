// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification channel traits for outbound email and SMS.

use async_trait::async_trait;

use crate::error::SoulscriptError;
use crate::types::{OutboundEmail, OutboundSms};

/// Outbound email channel.
///
/// Sends are best-effort: the dispatcher logs failures and moves on to the
/// next contact, so implementations should not retry internally.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), SoulscriptError>;
}

/// Outbound SMS channel.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, sms: &OutboundSms) -> Result<(), SoulscriptError>;
}
