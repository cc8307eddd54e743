// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Journal entry handlers.
//!
//! Creation classifies the content, persists the entry, and hands it to the
//! alert queue. The response never waits on alerting; a full queue or a
//! failed notification is invisible to the client.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use soulscript_core::JournalEntry;
use soulscript_storage::queries;

use crate::auth::AuthedUser;
use crate::error::ApiError;
use crate::handlers::now_rfc3339;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: String,
    /// Optional entry date; defaults to now.
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub success: bool,
    pub entry: JournalEntry,
}

#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub success: bool,
    pub entries: Vec<JournalEntry>,
}

fn require_fields(title: &str, content: &str, mood: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() || content.trim().is_empty() || mood.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Please provide title, content and mood",
        ));
    }
    Ok(())
}

/// POST /v1/journal
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), ApiError> {
    require_fields(&body.title, &body.content, &body.mood)?;

    let now = now_rfc3339();
    // Normalize the supplied date so lexical ordering stays chronological.
    let date = match body.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw.trim())
            .map_err(|_| ApiError::bad_request("Please provide a valid date"))?
            .with_timezone(&chrono::Utc)
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        None => now.clone(),
    };

    let prediction = state.classifier.classify(&body.content).await;

    let entry = JournalEntry {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        title: body.title.trim().to_string(),
        content: body.content,
        mood: body.mood.trim().to_string(),
        label: prediction.label,
        confidence: prediction.confidence,
        date,
        created_at: now.clone(),
        updated_at: now,
    };

    queries::entries::insert_entry(&state.db, &entry)
        .await
        .map_err(ApiError::from)?;

    // Fire and forget: alerting must never delay or fail the write.
    state.alerts.submit(soulscript_alerts::AlertJob {
        entry: entry.clone(),
    });

    Ok((
        StatusCode::CREATED,
        Json(EntryResponse {
            success: true,
            entry,
        }),
    ))
}

/// GET /v1/journal
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
) -> Result<Json<EntryListResponse>, ApiError> {
    let entries = queries::entries::list_for_user(&state.db, &user.id)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(EntryListResponse {
        success: true,
        entries,
    }))
}

/// GET /v1/journal/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
    Path(id): Path<String>,
) -> Result<Json<EntryResponse>, ApiError> {
    let entry = queries::entries::get_for_user(&state.db, &id, &user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Journal entry not found"))?;
    Ok(Json(EntryResponse {
        success: true,
        entry,
    }))
}

/// PUT /v1/journal/{id}
///
/// Edits title, content, and mood. The stored classification is immutable;
/// editing the text does not re-run the classifier.
pub async fn update_entry(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateEntryRequest>,
) -> Result<Json<EntryResponse>, ApiError> {
    require_fields(&body.title, &body.content, &body.mood)?;

    let changed = queries::entries::update_for_user(
        &state.db,
        &id,
        &user.id,
        body.title.trim(),
        &body.content,
        body.mood.trim(),
        &now_rfc3339(),
    )
    .await
    .map_err(ApiError::from)?;
    if !changed {
        return Err(ApiError::not_found("Journal entry not found"));
    }

    let entry = queries::entries::get_for_user(&state.db, &id, &user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Journal entry not found"))?;
    Ok(Json(EntryResponse {
        success: true,
        entry,
    }))
}

/// DELETE /v1/journal/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = queries::entries::delete_for_user(&state.db, &id, &user.id)
        .await
        .map_err(ApiError::from)?;
    if !deleted {
        return Err(ApiError::not_found("Journal entry not found"));
    }
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Journal entry deleted",
    })))
}
