// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account registration, login, and profile handlers.

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use regex::Regex;
use serde::{Deserialize, Serialize};
use soulscript_core::{Role, SoulscriptError, User};
use soulscript_storage::queries;

use crate::auth::{AuthedUser, TokenSigner, hash_password, verify_password};
use crate::error::ApiError;
use crate::handlers::now_rfc3339;
use crate::server::AppState;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"));

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub specialization: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: User,
}

fn signer(state: &AppState) -> Result<&TokenSigner, ApiError> {
    state.signer.as_ref().ok_or_else(|| {
        ApiError::from(SoulscriptError::Internal(
            "no token secret configured".to_string(),
        ))
    })
}

/// POST /v1/auth/register
pub async fn post_register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request(
            "Please provide name, email and password",
        ));
    }
    if body.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    if !EMAIL_RE.is_match(body.email.trim()) {
        return Err(ApiError::bad_request("Please provide a valid email address"));
    }

    let role = body.role.unwrap_or(Role::User);
    let specialization = body
        .specialization
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if role == Role::Therapist && specialization.as_ref().is_none_or(|s| s.chars().count() < 2) {
        return Err(ApiError::bad_request(
            "Therapists must provide a specialization",
        ));
    }

    // Resolve the signer first so a misconfigured server leaves no row behind.
    let signer = signer(&state)?;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: body.name.trim().to_string(),
        email: body.email.trim().to_lowercase(),
        password_hash: hash_password(&body.password)?,
        role,
        specialization,
        emergency_contacts: Vec::new(),
        created_at: now_rfc3339(),
    };

    queries::users::create_user(&state.db, &user)
        .await
        .map_err(|e| match e {
            SoulscriptError::Validation(message) => ApiError::conflict(message),
            other => ApiError::from(other),
        })?;

    let token = signer.mint(&user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user,
        }),
    ))
}

/// POST /v1/auth/login
pub async fn post_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Please provide email and password"));
    }

    let user = queries::users::get_user_by_email(&state.db, &body.email.trim().to_lowercase())
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = signer(&state)?.mint(&user.id)?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user,
    }))
}

/// GET /v1/auth/me
pub async fn get_me(Extension(AuthedUser(user)): Extension<AuthedUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        success: true,
        user,
    })
}
