// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by the alerting and notification backends.

pub mod contacts;
pub mod notify;

pub use contacts::ContactSource;
pub use notify::{Mailer, SmsGateway};
