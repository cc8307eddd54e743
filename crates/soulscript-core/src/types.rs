// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Soulscript workspace.
//!
//! Timestamps are RFC 3339 strings throughout; the storage layer persists
//! them verbatim so lexical ordering matches chronological ordering.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::label::MentalHealthLabel;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Therapist,
}

/// A registered user.
///
/// `emergency_contacts` is the legacy embedded contact list, kept as a
/// fallback while contacts migrate to the dedicated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub specialization: Option<String>,
    #[serde(default)]
    pub emergency_contacts: Vec<LegacyContact>,
    pub created_at: String,
}

/// A contact record embedded on the user document (legacy schema).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyContact {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A journal entry with its classification.
///
/// The classification (`label`, `confidence`) is assigned once at creation
/// and never updated; title, content, and mood remain editable by the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: String,
    #[serde(rename = "mental_health_class")]
    pub label: MentalHealthLabel,
    pub confidence: f64,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An emergency contact in the dedicated contacts table.
///
/// At least one of `phone_number` / `email` must be present for the contact
/// to be notifiable; contacts with neither are skipped by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: String,
    pub user_id: String,
    pub contact_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub relationship: String,
    pub created_at: String,
}

/// An alert email handed to a [`Mailer`](crate::traits::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// An alert SMS handed to an [`SmsGateway`](crate::traits::SmsGateway).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundSms {
    pub to: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_lowercase() {
        use std::str::FromStr;
        assert_eq!(Role::Therapist.to_string(), "therapist");
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, r#""user""#);
    }

    #[test]
    fn user_serialization_omits_password_hash() {
        let user = User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "secret-hash".into(),
            role: Role::User,
            specialization: None,
            emergency_contacts: vec![],
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("ada@example.com"));
    }

    #[test]
    fn journal_entry_exposes_mental_health_class() {
        let entry = JournalEntry {
            id: "e1".into(),
            user_id: "u1".into(),
            title: "today".into(),
            content: "a long day".into(),
            mood: "tired".into(),
            label: MentalHealthLabel::Stress,
            confidence: 0.82,
            date: "2026-01-02T10:00:00Z".into(),
            created_at: "2026-01-02T10:00:00Z".into(),
            updated_at: "2026-01-02T10:00:00Z".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""mental_health_class":"Stress""#));
    }

    #[test]
    fn legacy_contact_defaults_optional_channels() {
        let contact: LegacyContact = serde_json::from_str(r#"{"name":"Sam"}"#).unwrap();
        assert_eq!(contact.name, "Sam");
        assert!(contact.phone.is_none());
        assert!(contact.email.is_none());
    }
}
