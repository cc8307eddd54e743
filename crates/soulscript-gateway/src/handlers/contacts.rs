// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emergency contact handlers.

use std::sync::LazyLock;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use regex::Regex;
use serde::{Deserialize, Serialize};
use soulscript_core::EmergencyContact;
use soulscript_storage::queries;

use crate::auth::AuthedUser;
use crate::error::ApiError;
use crate::handlers::now_rfc3339;
use crate::server::AppState;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"));

// E.164, optionally with a leading plus.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone regex"));

#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub relationship: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub contact: EmergencyContact,
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub success: bool,
    pub contacts: Vec<EmergencyContact>,
}

/// GET /v1/emergency-contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
) -> Result<Json<ContactListResponse>, ApiError> {
    let contacts = queries::contacts::list_for_user(&state.db, &user.id)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(ContactListResponse {
        success: true,
        contacts,
    }))
}

/// POST /v1/emergency-contacts
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
    Json(body): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    if body.contact_name.trim().is_empty() || body.relationship.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Please provide contact name and relationship",
        ));
    }

    let email = match body.email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()) {
        Some(mut email) => {
            // Bare local parts are treated as Gmail addresses.
            if !email.contains('@') {
                email = format!("{email}@gmail.com");
            }
            if !EMAIL_RE.is_match(&email) {
                return Err(ApiError::bad_request("Please provide a valid email address"));
            }
            Some(email)
        }
        None => None,
    };

    let phone_number = match body
        .phone_number
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
    {
        Some(phone) => {
            if !PHONE_RE.is_match(&phone) {
                return Err(ApiError::bad_request("Please provide a valid phone number"));
            }
            Some(phone)
        }
        None => None,
    };

    let contact = EmergencyContact {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id,
        contact_name: body.contact_name.trim().to_string(),
        phone_number,
        email,
        relationship: body.relationship.trim().to_string(),
        created_at: now_rfc3339(),
    };

    queries::contacts::insert_contact(&state.db, &contact)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            contact,
        }),
    ))
}

/// DELETE /v1/emergency-contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(AuthedUser(user)): Extension<AuthedUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = queries::contacts::delete_for_user(&state.db, &id, &user.id)
        .await
        .map_err(ApiError::from)?;
    if !deleted {
        return Err(ApiError::not_found("Emergency contact not found"));
    }
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Emergency contact deleted",
    })))
}
