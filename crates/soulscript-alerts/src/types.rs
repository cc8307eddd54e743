// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert pipeline types.

use soulscript_core::{JournalEntry, MentalHealthLabel};

/// A unit of work on the alert queue: a freshly created journal entry to
/// evaluate for alerting.
#[derive(Debug, Clone)]
pub struct AlertJob {
    pub entry: JournalEntry,
}

/// What kind of alert to send, with the details the message template needs.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertContext {
    /// Immediate risk: the entry itself was classified as suicidal.
    Suicidal {
        entry_title: String,
        entry_date: String,
    },
    /// Concerning pattern: a run of recent entries with no normal days.
    Pattern {
        label: MentalHealthLabel,
        entry_count: usize,
    },
}

impl AlertContext {
    /// Email subject line for this alert.
    pub fn subject(&self) -> &'static str {
        match self {
            AlertContext::Suicidal { .. } => "URGENT: Mental Health Alert",
            AlertContext::Pattern { .. } => "Mental Health Alert",
        }
    }

    /// The message body sent to every contact, over both channels.
    pub fn message(&self, user_name: &str) -> String {
        match self {
            AlertContext::Suicidal { entry_date, .. } => format!(
                "URGENT: {user_name} has created a journal entry that contains potentially suicidal content on {entry_date}. Please reach out immediately to ensure their safety."
            ),
            AlertContext::Pattern { label, entry_count } => format!(
                "ALERT: {user_name} has shown consistent signs of {label} in their last {entry_count} journal entries. Please check on them as they may need support."
            ),
        }
    }
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// True when at least one notification went out.
    pub success: bool,
    /// Number of notifications sent (a contact with both channels counts twice).
    pub notified: usize,
}
