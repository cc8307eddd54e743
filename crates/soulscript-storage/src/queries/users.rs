// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User account CRUD operations.

use rusqlite::{OptionalExtension, params};
use soulscript_core::{Role, SoulscriptError, User};

use crate::database::{Database, map_tr_err};

/// Insert a new user account.
///
/// Returns a `Validation` error when the email address is already registered.
pub async fn create_user(db: &Database, user: &User) -> Result<(), SoulscriptError> {
    let contacts_json = serde_json::to_string(&user.emergency_contacts)
        .map_err(|e| SoulscriptError::Internal(format!("serialize contacts: {e}")))?;
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (id, name, email, password_hash, role, specialization, emergency_contacts, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    user.id,
                    user.name,
                    user.email,
                    user.password_hash,
                    user.role.to_string(),
                    user.specialization,
                    contacts_json,
                    user.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| match &e {
            tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(f, _))
                if f.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                SoulscriptError::Validation("email already registered".to_string())
            }
            _ => map_tr_err(e),
        })
}

/// Fetch a user by id.
pub async fn get_user(db: &Database, id: &str) -> Result<Option<User>, SoulscriptError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let user = conn
                .query_row(
                    "SELECT id, name, email, password_hash, role, specialization, emergency_contacts, created_at
                     FROM users WHERE id = ?1",
                    params![id],
                    map_user_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a user by email address, used by login.
pub async fn get_user_by_email(db: &Database, email: &str) -> Result<Option<User>, SoulscriptError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let user = conn
                .query_row(
                    "SELECT id, name, email, password_hash, role, specialization, emergency_contacts, created_at
                     FROM users WHERE email = ?1",
                    params![email],
                    map_user_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
        .map_err(map_tr_err)
}

fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let role_raw: String = row.get(4)?;
    let role: Role = role_raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let contacts_raw: String = row.get(6)?;
    let emergency_contacts = serde_json::from_str(&contacts_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role,
        specialization: row.get(5)?,
        emergency_contacts,
        created_at: row.get(7)?,
    })
}
