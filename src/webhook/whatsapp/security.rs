//! Security checks for WhatsApp webhook requests
//!
//! - the verify token of the subscription handshake
//! - the `X-Hub-Signature-256` header Meta adds to every delivery: the
//!   HMAC-SHA256 of the raw body keyed with the app secret, formatted as
//!   `sha256=<hex>`
//!
//! Both comparisons are constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compares the handshake token with the configured one
pub fn verify_token_matches(received: &str, expected: &str) -> bool {
    received.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Verifies the X-Hub-Signature-256 header against the raw request body.
///
/// The signature must be computed on the raw body bytes, never on re-serialized
/// json.
pub fn verify_signature(signature_header: &str, payload: &[u8], app_secret: &str) -> bool {
    let Some(signature_hex) = signature_header.strip_prefix("sha256=") else {
        logfire::warn!("webhook signature header without 'sha256=' prefix");
        return false;
    };

    let received_signature = match hex::decode(signature_hex) {
        Ok(sig) => sig,
        Err(e) => {
            logfire::warn!(
                "webhook signature is not hex: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            logfire::error!("cant build webhook hmac: {error}", error = e.to_string());
            return false;
        }
    };
    mac.update(payload);

    mac.finalize()
        .into_bytes()
        .ct_eq(&received_signature[..])
        .into()
}
