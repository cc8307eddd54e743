// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact resolution trait for the notification dispatcher.

use async_trait::async_trait;

use crate::error::SoulscriptError;
use crate::types::EmergencyContact;

/// A source of emergency contacts for a user.
///
/// The dispatcher holds an ordered chain of sources and uses the first one
/// that returns a non-empty list. Two implementations exist today: the
/// dedicated contacts table and the legacy list embedded on the user row.
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Short name for logging (e.g. "contacts-table", "user-embedded").
    fn name(&self) -> &str;

    /// Returns all contacts for the given user. An empty list is not an
    /// error; it simply means the next source in the chain is consulted.
    async fn contacts_for(&self, user_id: &str)
        -> Result<Vec<EmergencyContact>, SoulscriptError>;
}
