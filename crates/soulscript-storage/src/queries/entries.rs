// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Journal entry CRUD operations.
//!
//! The classification columns (`mental_health_class`, `confidence`) are
//! written once at insert and never touched by updates.

use rusqlite::{OptionalExtension, params};
use soulscript_core::{JournalEntry, MentalHealthLabel, SoulscriptError};

use crate::database::{Database, map_tr_err};

const ENTRY_COLUMNS: &str =
    "id, user_id, title, content, mood, mental_health_class, confidence, date, created_at, updated_at";

/// Insert a new journal entry.
pub async fn insert_entry(db: &Database, entry: &JournalEntry) -> Result<(), SoulscriptError> {
    let entry = entry.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO journal_entries (id, user_id, title, content, mood, mental_health_class, confidence, date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    entry.id,
                    entry.user_id,
                    entry.title,
                    entry.content,
                    entry.mood,
                    entry.label.to_string(),
                    entry.confidence,
                    entry.date,
                    entry.created_at,
                    entry.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All entries for a user, newest first.
pub async fn list_for_user(
    db: &Database,
    user_id: &str,
) -> Result<Vec<JournalEntry>, SoulscriptError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM journal_entries
                 WHERE user_id = ?1 ORDER BY date DESC, created_at DESC"
            ))?;
            let rows = stmt.query_map(params![user_id], map_entry_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(map_tr_err)
}

/// The user's most recent entries, newest first, capped at `limit`.
///
/// This is the window the pattern-alert evaluator looks at.
pub async fn recent_for_user(
    db: &Database,
    user_id: &str,
    limit: i64,
) -> Result<Vec<JournalEntry>, SoulscriptError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM journal_entries
                 WHERE user_id = ?1 ORDER BY date DESC, created_at DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user_id, limit], map_entry_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a single entry, scoped to its owner.
pub async fn get_for_user(
    db: &Database,
    entry_id: &str,
    user_id: &str,
) -> Result<Option<JournalEntry>, SoulscriptError> {
    let entry_id = entry_id.to_string();
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let entry = conn
                .query_row(
                    &format!(
                        "SELECT {ENTRY_COLUMNS} FROM journal_entries
                         WHERE id = ?1 AND user_id = ?2"
                    ),
                    params![entry_id, user_id],
                    map_entry_row,
                )
                .optional()?;
            Ok(entry)
        })
        .await
        .map_err(map_tr_err)
}

/// Update the editable fields of an entry, scoped to its owner.
///
/// Returns false when no row matched, so callers can answer 404 without a
/// separate existence check.
pub async fn update_for_user(
    db: &Database,
    entry_id: &str,
    user_id: &str,
    title: &str,
    content: &str,
    mood: &str,
    updated_at: &str,
) -> Result<bool, SoulscriptError> {
    let entry_id = entry_id.to_string();
    let user_id = user_id.to_string();
    let title = title.to_string();
    let content = content.to_string();
    let mood = mood.to_string();
    let updated_at = updated_at.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE journal_entries SET title = ?1, content = ?2, mood = ?3, updated_at = ?4
                 WHERE id = ?5 AND user_id = ?6",
                params![title, content, mood, updated_at, entry_id, user_id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete an entry, scoped to its owner. Returns false when no row matched.
pub async fn delete_for_user(
    db: &Database,
    entry_id: &str,
    user_id: &str,
) -> Result<bool, SoulscriptError> {
    let entry_id = entry_id.to_string();
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2",
                params![entry_id, user_id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

fn map_entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<JournalEntry> {
    let label_raw: String = row.get(5)?;
    let label: MentalHealthLabel = label_raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(JournalEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        mood: row.get(4)?,
        label,
        confidence: row.get(6)?,
        date: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
