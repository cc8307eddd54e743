// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Soulscript platform.
//!
//! This crate provides the shared error type, domain types (users, journal
//! entries, emergency contacts, the classification label set), and the
//! adapter traits implemented by the notification and contact-resolution
//! backends. All other Soulscript crates build on the definitions here.

pub mod error;
pub mod label;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SoulscriptError;
pub use label::MentalHealthLabel;
pub use types::{EmergencyContact, JournalEntry, LegacyContact, OutboundEmail, OutboundSms, Role, User};

// Re-export adapter traits at crate root.
pub use traits::{ContactSource, Mailer, SmsGateway};
