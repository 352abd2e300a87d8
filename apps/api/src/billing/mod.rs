//! Billing — subscription checkout and the signed plan-flip webhook.
//!
//! The payment provider owns the whole money path; this module's only
//! obligations are (1) minting a checkout session URL and (2) flipping the
//! user's plan flag when a correctly signed `checkout.session.completed`
//! event arrives. A bad signature rejects with NO state change.

use axum::{extract::State, http::HeaderMap, Json};
use bytes::Bytes;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use crate::auth::{decode_hex, AuthSession};
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

const CHECKOUT_SESSIONS_URL: &str = "https://api.stripe.com/v1/checkout/sessions";
const SIGNATURE_HEADER: &str = "stripe-signature";

// ────────────────────────────────────────────────────────────────────────────
// Checkout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: String,
}

/// POST /api/v1/billing/checkout
///
/// Creates a subscription checkout session for the signed-in user and
/// returns the redirect URL. The user id travels in session metadata so
/// the webhook can find the profile to flip.
pub async fn handle_checkout(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<CheckoutResponse>, AppError> {
    let profile: Option<ProfileRow> =
        sqlx::query_as("SELECT user_id, email, plan FROM profiles WHERE user_id = $1")
            .bind(session.user_id)
            .fetch_optional(&state.db)
            .await?;

    let profile = profile
        .ok_or_else(|| AppError::NotFound(format!("Profile for {} not found", session.user_id)))?;

    let success_url = format!("{}/billing/success", state.config.app_url);
    let cancel_url = format!("{}/billing/cancel", state.config.app_url);
    let user_id = session.user_id.to_string();

    let params = [
        ("customer_email", profile.email.as_str()),
        ("line_items[0][price]", state.config.billing_price_id.as_str()),
        ("line_items[0][quantity]", "1"),
        ("mode", "subscription"),
        ("success_url", success_url.as_str()),
        ("cancel_url", cancel_url.as_str()),
        ("metadata[user_id]", user_id.as_str()),
    ];

    let response = state
        .http
        .post(CHECKOUT_SESSIONS_URL)
        .bearer_auth(&state.config.billing_secret_key)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("checkout session creation failed ({status}): {body}");
        return Err(AppError::Internal(anyhow::anyhow!(
            "billing provider returned {status}"
        )));
    }

    let session: CheckoutSession = response
        .json()
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(CheckoutResponse { url: session.url }))
}

// ────────────────────────────────────────────────────────────────────────────
// Webhook
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: WebhookData,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookData {
    #[serde(default)]
    object: WebhookObject,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookObject {
    #[serde(default)]
    metadata: WebhookMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookMetadata {
    #[serde(default)]
    user_id: Option<Uuid>,
}

/// POST /api/v1/billing/webhook
///
/// Raw-body handler: the signature covers the exact payload bytes, so this
/// must not go through the JSON extractor.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let signature_header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidSignature)?;

    verify_signature(&state.config.billing_webhook_secret, signature_header, &body)?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Parse(format!("webhook payload: {e}")))?;

    let Some(user_id) = event.data.object.metadata.user_id else {
        // Events without our metadata are acknowledged and ignored.
        return Ok(Json(json!({ "received": true })));
    };

    if event.event_type == "checkout.session.completed" {
        sqlx::query("UPDATE profiles SET plan = 'pro' WHERE user_id = $1")
            .bind(user_id)
            .execute(&state.db)
            .await?;
        tracing::info!("plan upgraded to pro for user {user_id}");
    }

    Ok(Json(json!({ "received": true })))
}

/// Verifies a `t=<unix>,v1=<hex>` signature header: hex HMAC-SHA256 over
/// `"{t}.{payload}"` with the webhook secret. Comparison happens inside
/// the MAC verification, not on hex strings.
fn verify_signature(secret: &str, header: &str, payload: &[u8]) -> Result<(), AppError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }

    let (timestamp, signature) = match (timestamp, signature) {
        (Some(t), Some(s)) => (t, s),
        _ => return Err(AppError::InvalidSignature),
    };

    let signature = decode_hex(signature).ok_or(AppError::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::InvalidSignature)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.verify_slice(&signature)
        .map_err(|_| AppError::InvalidSignature)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::encode_hex;

    fn sign(secret: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        encode_hex(&mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_accepted() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let sig = sign("whsec_test", "1700000000", payload);
        let header = format!("t=1700000000,v1={sig}");
        assert!(verify_signature("whsec_test", &header, payload).is_ok());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let sig = sign("whsec_test", "1700000000", payload);
        let header = format!("t=1700000000,v1={sig}");
        let err = verify_signature("whsec_test", &header, b"{}").unwrap_err();
        assert!(matches!(err, AppError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let payload = b"{}";
        let sig = sign("whsec_a", "1700000000", payload);
        let header = format!("t=1700000000,v1={sig}");
        assert!(verify_signature("whsec_b", &header, payload).is_err());
    }

    #[test]
    fn test_wrong_timestamp_rejected() {
        let payload = b"{}";
        let sig = sign("whsec_test", "1700000000", payload);
        let header = format!("t=1700000001,v1={sig}");
        assert!(verify_signature("whsec_test", &header, payload).is_err());
    }

    #[test]
    fn test_malformed_headers_rejected() {
        for header in ["", "t=123", "v1=abcd", "t=123,v1=zz", "nonsense"] {
            assert!(verify_signature("whsec_test", header, b"{}").is_err());
        }
    }

    #[test]
    fn test_event_with_metadata_deserializes() {
        let raw = r#"{
            "type": "checkout.session.completed",
            "data": {"object": {"metadata": {"user_id": "7f8a1c62-30f4-4a3e-9f0a-6a2b8f9d4e11"}}}
        }"#;
        let event: WebhookEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.event_type, "checkout.session.completed");
        assert!(event.data.object.metadata.user_id.is_some());
    }

    #[test]
    fn test_event_without_metadata_deserializes() {
        let event: WebhookEvent =
            serde_json::from_str(r#"{"type":"invoice.paid","data":{"object":{}}}"#).unwrap();
        assert_eq!(event.data.object.metadata.user_id, None);
    }
}
