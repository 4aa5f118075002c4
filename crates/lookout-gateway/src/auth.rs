// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack request signature verification.
//!
//! Every Events API request carries `X-Slack-Request-Timestamp` and
//! `X-Slack-Signature: v0=<hex>`, where the hex digest is
//! HMAC-SHA256(signing_secret, `v0:<timestamp>:<raw body>`). Requests with a
//! missing, malformed or mismatched signature, or a timestamp more than five
//! minutes from now, are rejected with 401 before any handler runs.

use std::time::Duration;

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signature scheme version prefix.
const VERSION: &str = "v0";

/// Largest request body the gateway will buffer for verification.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Signing configuration for the gateway.
#[derive(Clone)]
pub struct SigningConfig {
    /// Slack app signing secret.
    pub secret: String,
    /// Maximum allowed distance between the request timestamp and now.
    pub max_age: Duration,
}

impl SigningConfig {
    /// Five-minute replay window.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            max_age: Duration::from_secs(300),
        }
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret", &"[redacted]")
            .field("max_age", &self.max_age)
            .finish()
    }
}

/// Why a request failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    MissingHeaders,
    BadTimestamp,
    Stale,
    Malformed,
    Mismatch,
}

/// Computes the `v0=<hex>` signature for a request.
pub fn compute_signature(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mac = signing_mac(secret, timestamp, body);
    format!("{VERSION}={}", hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a signature against the secret, timestamp and raw body.
///
/// `now` is unix seconds. The digest comparison is constant-time.
pub fn verify_signature(
    config: &SigningConfig,
    timestamp: &str,
    signature: &str,
    body: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let ts: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| SignatureError::BadTimestamp)?;
    if now.abs_diff(ts) > config.max_age.as_secs() {
        return Err(SignatureError::Stale);
    }

    let digest = signature
        .strip_prefix("v0=")
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
        .ok_or(SignatureError::Malformed)?;

    signing_mac(&config.secret, timestamp, body)
        .verify_slice(&digest)
        .map_err(|_| SignatureError::Mismatch)
}

fn signing_mac(secret: &str, timestamp: &str, body: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length; the error arm is unreachable.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    mac
}

/// Middleware that rejects requests without a valid Slack signature.
///
/// The body is buffered for hashing and handed on unchanged.
pub async fn slack_signature_middleware(
    State(signing): State<SigningConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let (Some(timestamp), Some(signature)) = (header(TIMESTAMP_HEADER), header(SIGNATURE_HEADER))
    else {
        tracing::debug!(reason = ?SignatureError::MissingHeaders, "request rejected");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    let now = chrono::Utc::now().timestamp();
    if let Err(reason) = verify_signature(&signing, &timestamp, &signature, &bytes, now) {
        tracing::warn!(?reason, "Slack signature verification failed");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
