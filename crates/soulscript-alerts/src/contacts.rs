// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact resolution sources.
//!
//! The dispatcher walks an ordered chain of [`ContactSource`]s and uses the
//! first source that returns any contacts. The dedicated contacts table is
//! preferred; the legacy JSON list embedded in the user row is the fallback
//! for accounts created before the table existed.

use async_trait::async_trait;
use soulscript_core::{ContactSource, EmergencyContact, SoulscriptError};
use soulscript_storage::{Database, queries};

/// Contacts from the dedicated `emergency_contacts` table.
pub struct ContactTableSource {
    db: Database,
}

impl ContactTableSource {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactSource for ContactTableSource {
    fn name(&self) -> &str {
        "contacts-table"
    }

    async fn contacts_for(&self, user_id: &str) -> Result<Vec<EmergencyContact>, SoulscriptError> {
        queries::contacts::list_for_user(&self.db, user_id).await
    }
}

/// Contacts from the legacy list embedded in the user row.
pub struct LegacyUserSource {
    db: Database,
}

impl LegacyUserSource {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactSource for LegacyUserSource {
    fn name(&self) -> &str {
        "legacy-user-list"
    }

    async fn contacts_for(&self, user_id: &str) -> Result<Vec<EmergencyContact>, SoulscriptError> {
        let Some(user) = queries::users::get_user(&self.db, user_id).await? else {
            return Ok(Vec::new());
        };
        let contacts = user
            .emergency_contacts
            .into_iter()
            .enumerate()
            .map(|(i, c)| EmergencyContact {
                id: format!("legacy-{i}"),
                user_id: user_id.to_string(),
                contact_name: c.name,
                phone_number: c.phone,
                email: c.email,
                relationship: "emergency contact".to_string(),
                created_at: user.created_at.clone(),
            })
            .collect();
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulscript_core::{LegacyContact, Role, User};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn legacy_source_maps_embedded_list() {
        let (db, _dir) = setup_db().await;
        let user = User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
            specialization: None,
            emergency_contacts: vec![LegacyContact {
                name: "Grace".to_string(),
                phone: Some("+15551234567".to_string()),
                email: None,
            }],
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        queries::users::create_user(&db, &user).await.unwrap();

        let source = LegacyUserSource::new(db.clone());
        let contacts = source.contacts_for("u1").await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].contact_name, "Grace");
        assert_eq!(contacts[0].phone_number.as_deref(), Some("+15551234567"));
        assert!(contacts[0].email.is_none());

        // Unknown users resolve to an empty list, not an error.
        assert!(source.contacts_for("missing").await.unwrap().is_empty());
        db.close().await.unwrap();
    }
}
