//! Session guard — the explicit session context passed to handlers.
//!
//! The hosted auth provider owns sign-in and mints bearer tokens of the
//! form `<user_id>.<expires_unix>.<hex hmac-sha256 signature>` with a
//! secret shared with this service. The extractor verifies and expires
//! them; there is no ambient auth state anywhere else.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// The authenticated caller. Extracting this from a request IS the route
/// guard: handlers that take it reject unauthenticated calls with 401
/// before any of their own code runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthSession {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let user_id = verify_session_token(&app.config.auth_token_secret, token)
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthSession { user_id })
    }
}

/// Verifies a `user_id.expires.sig` token; returns the user id on success.
/// Any malformation, expiry, or signature mismatch is a uniform None — the
/// caller only ever learns "unauthorized".
fn verify_session_token(secret: &str, token: &str) -> Option<Uuid> {
    let mut parts = token.splitn(3, '.');
    let user_id_part = parts.next()?;
    let expires_part = parts.next()?;
    let signature_part = parts.next()?;

    let user_id = Uuid::parse_str(user_id_part).ok()?;
    let expires: i64 = expires_part.parse().ok()?;
    if expires < chrono::Utc::now().timestamp() {
        return None;
    }

    let signature = decode_hex(signature_part)?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(format!("{user_id_part}.{expires_part}").as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(user_id)
}

pub(crate) fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }
    (0..input.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&input[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub plan: String,
}

/// GET /api/v1/me
///
/// The session context the UI needs after sign-in: who the caller is and
/// which plan they are on. Missing profile rows read as the free plan.
pub async fn handle_me(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<MeResponse>, AppError> {
    let profile: Option<ProfileRow> =
        sqlx::query_as("SELECT user_id, email, plan FROM profiles WHERE user_id = $1")
            .bind(session.user_id)
            .fetch_optional(&state.db)
            .await?;

    Ok(Json(MeResponse {
        user_id: session.user_id,
        plan: profile.map(|p| p.plan).unwrap_or_else(|| "free".to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mint_token(secret: &str, user_id: Uuid, expires: i64) -> String {
        let message = format!("{user_id}.{expires}");
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        let signature = encode_hex(&mac.finalize().into_bytes());
        format!("{message}.{signature}")
    }

    fn far_future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_valid_token_round_trips() {
        let user_id = Uuid::new_v4();
        let token = mint_token("secret", user_id, far_future());
        assert_eq!(verify_session_token("secret", &token), Some(user_id));
    }

    #[test]
    fn test_expired_token_rejected() {
        let user_id = Uuid::new_v4();
        let token = mint_token("secret", user_id, chrono::Utc::now().timestamp() - 10);
        assert_eq!(verify_session_token("secret", &token), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = mint_token("secret", Uuid::new_v4(), far_future());
        assert_eq!(verify_session_token("other-secret", &token), None);
    }

    #[test]
    fn test_tampered_user_id_rejected() {
        let token = mint_token("secret", Uuid::new_v4(), far_future());
        let other = Uuid::new_v4();
        let tampered = format!(
            "{other}.{}",
            token.split_once('.').unwrap().1
        );
        assert_eq!(verify_session_token("secret", &tampered), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for token in ["", "abc", "a.b", "not-a-uuid.123.deadbeef"] {
            assert_eq!(verify_session_token("secret", token), None);
        }
    }

    #[test]
    fn test_hex_round_trip() {
        let bytes = vec![0x00, 0xff, 0x1a, 0x2b];
        assert_eq!(decode_hex(&encode_hex(&bytes)), Some(bytes));
        assert_eq!(decode_hex("xyz"), None);
        assert_eq!(decode_hex("abc"), None);
    }
}
