//! Webhook payload signature computation and verification.
//!
//! The forge signs each hook delivery with HMAC-SHA256 over the raw body and
//! sends the result in the `X-Hub-Signature-256` header as `sha256=<hex>`.
//! [`WebhookVerifier`] checks that header against a shared secret;
//! [`compute_signature`] produces the same header value for test deliveries.

use crate::errors::{ForgeError, ForgeResult};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies hook delivery signatures against a shared secret.
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    /// Creates a verifier for the given hook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies a delivery body against its `sha256=<hex>` signature header.
    ///
    /// A malformed header (missing prefix or bad hex) yields
    /// [`PayloadInvalid`](crate::errors::ForgeErrorKind::PayloadInvalid); a
    /// well-formed signature that does not match the payload yields
    /// [`SignatureInvalid`](crate::errors::ForgeErrorKind::SignatureInvalid).
    /// The comparison is constant-time.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> ForgeResult<()> {
        let hex_digest = signature_header.strip_prefix("sha256=").ok_or_else(|| {
            ForgeError::payload_invalid("signature header must start with 'sha256='")
        })?;

        let signature = hex::decode(hex_digest).map_err(|e| {
            ForgeError::payload_invalid(format!("signature header is not valid hex: {}", e))
        })?;

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| ForgeError::payload_invalid(format!("failed to create HMAC: {}", e)))?;
        mac.update(payload);

        mac.verify_slice(&signature)
            .map_err(|_| ForgeError::signature_invalid("signature does not match payload"))
    }

    /// Verifies a delivery and deserializes its body.
    pub fn verify_and_parse<T: for<'de> Deserialize<'de>>(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> ForgeResult<T> {
        self.verify(payload, signature_header)?;
        serde_json::from_slice(payload).map_err(|e| {
            ForgeError::payload_invalid(format!("failed to parse webhook payload: {}", e))
        })
    }
}

/// Computes the `sha256=<hex>` signature header for a payload.
pub fn compute_signature(secret: &str, payload: &[u8]) -> ForgeResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ForgeError::payload_invalid(format!("failed to create HMAC: {}", e)))?;
    mac.update(payload);
    let digest = mac.finalize();
    Ok(format!("sha256={}", hex::encode(digest.into_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ForgeErrorKind;

    #[test]
    fn test_round_trip() {
        let secret = "hook_secret";
        let payload = br#"{"zen":"Keep it logically awesome."}"#;

        let header = compute_signature(secret, payload).unwrap();
        assert!(header.starts_with("sha256="));

        let verifier = WebhookVerifier::new(secret);
        verifier.verify(payload, &header).unwrap();
    }

    #[test]
    fn test_mismatch_is_signature_invalid() {
        let payload = b"payload";
        let header = compute_signature("right_secret", payload).unwrap();

        let verifier = WebhookVerifier::new("wrong_secret");
        let err = verifier.verify(payload, &header).unwrap_err();
        assert_eq!(err.kind(), ForgeErrorKind::SignatureInvalid);
    }

    #[test]
    fn test_missing_prefix_is_payload_invalid() {
        let verifier = WebhookVerifier::new("secret");
        let err = verifier.verify(b"payload", "deadbeef").unwrap_err();
        assert_eq!(err.kind(), ForgeErrorKind::PayloadInvalid);
    }

    #[test]
    fn test_bad_hex_is_payload_invalid() {
        let verifier = WebhookVerifier::new("secret");
        let err = verifier.verify(b"payload", "sha256=zz").unwrap_err();
        assert_eq!(err.kind(), ForgeErrorKind::PayloadInvalid);
    }

    #[test]
    fn test_verify_and_parse() {
        #[derive(Deserialize)]
        struct Ping {
            zen: String,
        }

        let secret = "hook_secret";
        let payload = br#"{"zen":"Design for failure."}"#;
        let header = compute_signature(secret, payload).unwrap();

        let verifier = WebhookVerifier::new(secret);
        let ping: Ping = verifier.verify_and_parse(payload, &header).unwrap();
        assert_eq!(ping.zen, "Design for failure.");
    }
}
