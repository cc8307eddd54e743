// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emergency contact CRUD operations.

use rusqlite::params;
use soulscript_core::{EmergencyContact, SoulscriptError};

use crate::database::{Database, map_tr_err};

/// Insert a new emergency contact.
pub async fn insert_contact(
    db: &Database,
    contact: &EmergencyContact,
) -> Result<(), SoulscriptError> {
    let contact = contact.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO emergency_contacts (id, user_id, contact_name, phone_number, email, relationship, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    contact.id,
                    contact.user_id,
                    contact.contact_name,
                    contact.phone_number,
                    contact.email,
                    contact.relationship,
                    contact.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All contacts for a user, oldest first.
pub async fn list_for_user(
    db: &Database,
    user_id: &str,
) -> Result<Vec<EmergencyContact>, SoulscriptError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, contact_name, phone_number, email, relationship, created_at
                 FROM emergency_contacts WHERE user_id = ?1 ORDER BY created_at ASC",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(EmergencyContact {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    contact_name: row.get(2)?,
                    phone_number: row.get(3)?,
                    email: row.get(4)?,
                    relationship: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut contacts = Vec::new();
            for row in rows {
                contacts.push(row?);
            }
            Ok(contacts)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a contact, scoped to its owner. Returns false when no row matched.
pub async fn delete_for_user(
    db: &Database,
    contact_id: &str,
    user_id: &str,
) -> Result<bool, SoulscriptError> {
    let contact_id = contact_id.to_string();
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "DELETE FROM emergency_contacts WHERE id = ?1 AND user_id = ?2",
                params![contact_id, user_id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}
