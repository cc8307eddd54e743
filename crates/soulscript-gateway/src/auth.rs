// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password hashing and bearer token authentication.
//!
//! Tokens are HMAC-SHA256 signed: `base64url(user_id:expiry) . hex(mac)`.
//! When no token secret is configured, every authenticated route rejects
//! requests (fail-closed).

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use soulscript_core::{SoulscriptError, User};
use soulscript_storage::queries;
use tracing::error;

use crate::error::ApiError;
use crate::server::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Hash a password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, SoulscriptError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| SoulscriptError::Auth(format!("failed to hash password: {e}")))
}

/// Verify a password against a stored argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Mints and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
    ttl_days: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[redacted]")
            .field("ttl_days", &self.ttl_days)
            .finish()
    }
}

impl TokenSigner {
    pub fn new(secret: String, ttl_days: i64) -> Self {
        Self { secret, ttl_days }
    }

    /// Issue a token for `user_id` valid for the configured TTL.
    pub fn mint(&self, user_id: &str) -> Result<String, SoulscriptError> {
        let expires_at = Utc::now() + chrono::Duration::days(self.ttl_days);
        let payload = format!("{user_id}:{}", expires_at.timestamp());
        let mac = self.mac(payload.as_bytes())?;
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            hex::encode(mac)
        ))
    }

    /// Returns the user id when the token's signature and expiry check out.
    pub fn verify(&self, token: &str) -> Option<String> {
        let (payload_b64, sig_hex) = token.split_once('.')?;
        let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(payload_b64).ok()?).ok()?;
        let sig = hex::decode(sig_hex).ok()?;

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&sig).ok()?;

        let (user_id, expiry) = payload.rsplit_once(':')?;
        let expiry: i64 = expiry.parse().ok()?;
        if Utc::now().timestamp() >= expiry {
            return None;
        }
        Some(user_id.to_string())
    }

    fn mac(&self, payload: &[u8]) -> Result<Vec<u8>, SoulscriptError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| SoulscriptError::Auth(format!("invalid token secret: {e}")))?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// The authenticated user, inserted into request extensions by the
/// middleware.
#[derive(Debug, Clone)]
pub struct AuthedUser(pub User);

/// Middleware that validates the bearer token and loads the account.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(signer) = &state.signer else {
        error!("no token secret configured, rejecting request");
        return Err(ApiError::unauthorized("authentication is not configured"));
    };

    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;

    let user_id = signer
        .verify(token)
        .ok_or_else(|| ApiError::unauthorized("invalid or expired token"))?;

    let user = queries::users::get_user(&state.db, &user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("unknown user"))?;

    request.extensions_mut().insert(AuthedUser(user));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter42").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter42", &hash));
        assert!(!verify_password("hunter43", &hash));
        assert!(!verify_password("hunter42", "not a hash"));
    }

    #[test]
    fn token_round_trip() {
        let signer = TokenSigner::new("a-secret-at-least-16".to_string(), 30);
        let token = signer.mint("u1").unwrap();
        assert_eq!(signer.verify(&token).as_deref(), Some("u1"));
    }

    #[test]
    fn tampered_token_rejected() {
        let signer = TokenSigner::new("a-secret-at-least-16".to_string(), 30);
        let token = signer.mint("u1").unwrap();

        let mut forged = token.clone();
        forged.pop();
        assert!(signer.verify(&forged).is_none());

        let other = TokenSigner::new("a-different-secret-16".to_string(), 30);
        assert!(other.verify(&token).is_none());
        assert!(signer.verify("garbage").is_none());
    }

    #[test]
    fn expired_token_rejected() {
        let signer = TokenSigner::new("a-secret-at-least-16".to_string(), -1);
        let token = signer.mint("u1").unwrap();
        assert!(signer.verify(&token).is_none());
    }

    #[test]
    fn user_id_with_colon_survives() {
        let signer = TokenSigner::new("a-secret-at-least-16".to_string(), 30);
        let token = signer.mint("ns:u1").unwrap();
        assert_eq!(signer.verify(&token).as_deref(), Some("ns:u1"));
    }
}
