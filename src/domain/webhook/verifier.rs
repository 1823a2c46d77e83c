//! Webhook signature verification.
//!
//! Authenticates inbound webhook deliveries with HMAC-SHA256 over the raw
//! payload, with timestamp validation to bound replay windows and
//! constant-time signature comparison.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::event::WebhookEvent;
use super::signature::SignatureHeader;

type HmacSha256 = Hmac<Sha256>;

/// Default tolerance for timestamp skew and replay (5 minutes).
///
/// Generous enough for real network and queueing delay, tight enough that a
/// captured delivery cannot be resubmitted indefinitely.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// A payload that has passed timestamp and signature verification.
///
/// Constructed only by [`WebhookVerifier::verify`]; a rejected request never
/// produces one. Decoding is a method on this type so parsing can only
/// happen after authentication.
#[derive(Debug)]
pub struct VerifiedPayload<'a> {
    raw: &'a [u8],
    timestamp: i64,
}

impl<'a> VerifiedPayload<'a> {
    /// The exact bytes received over the wire.
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// The validated header timestamp, in Unix seconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Decodes the payload into a structured event.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::PayloadParsing` for malformed JSON or missing
    /// required fields (`id`, `type`, `created`).
    pub fn decode(&self) -> Result<WebhookEvent, WebhookError> {
        WebhookEvent::from_payload(self.raw)
    }
}

/// Verifier for inbound webhook signatures.
///
/// Holds the signing secret(s) and tolerance window as immutable
/// configuration; safe for concurrent use across requests.
pub struct WebhookVerifier {
    /// Accepted signing secrets: the current one first, plus the previous
    /// one during a rotation overlap window.
    secrets: Vec<SecretString>,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// Creates a verifier with the given signing secret and default
    /// tolerance.
    pub fn new(secret: SecretString) -> Self {
        Self {
            secrets: vec![secret],
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Also accept signatures made with a previous secret (rotation overlap).
    pub fn with_previous_secret(mut self, secret: SecretString) -> Self {
        self.secrets.push(secret);
        self
    }

    /// Overrides the replay/clock-skew tolerance window.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies a raw payload against a parsed signature header.
    ///
    /// # Verification Steps
    ///
    /// 1. Validate the timestamp is numeric and within the tolerance window
    /// 2. Compute the expected signature for each configured secret
    /// 3. Accept if any provided signature matches any expected one,
    ///    using constant-time comparison
    ///
    /// # Errors
    ///
    /// - `InvalidTimestamp` - timestamp is not an integer
    /// - `TimestampOutOfRange` - timestamp outside the window, suspected replay
    /// - `SignatureMismatch` - no provided signature matched
    pub fn verify<'a>(
        &self,
        payload: &'a [u8],
        header: &SignatureHeader,
    ) -> Result<VerifiedPayload<'a>, WebhookError> {
        let timestamp = self.check_timestamp(&header.timestamp)?;

        let matched = self.secrets.iter().any(|secret| {
            let expected = self.expected_signature(secret, &header.timestamp, payload);
            header
                .signatures
                .iter()
                .any(|candidate| signatures_match(candidate, &expected))
        });

        if !matched {
            return Err(WebhookError::SignatureMismatch);
        }

        Ok(VerifiedPayload {
            raw: payload,
            timestamp,
        })
    }

    /// Validates the timestamp string and bounds it against the window.
    ///
    /// Rejects both stale timestamps (replayed deliveries) and timestamps
    /// too far in the future (clock-skew-forged requests).
    fn check_timestamp(&self, raw: &str) -> Result<i64, WebhookError> {
        let timestamp: i64 = raw.parse().map_err(|_| WebhookError::InvalidTimestamp)?;

        let now = chrono::Utc::now().timestamp();
        let delta_secs = now - timestamp;

        if delta_secs.abs() > self.tolerance_secs {
            return Err(WebhookError::TimestampOutOfRange { delta_secs });
        }

        Ok(timestamp)
    }

    /// Computes the lowercase-hex HMAC-SHA256 of `{timestamp}.{payload}`.
    ///
    /// The MAC input is the original timestamp string, a literal `.`, and
    /// the payload bytes exactly as received. Any re-encoding of the payload
    /// before this point would break verification for legitimate requests.
    fn expected_signature(
        &self,
        secret: &SecretString,
        timestamp: &str,
        payload: &[u8],
    ) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Compares two hex signature strings in constant time.
///
/// Length may short-circuit: signature length is fixed and public. For
/// equal-length inputs the comparison inspects every byte regardless of
/// where the first difference is, so response timing leaks nothing about
/// the expected signature.
fn signatures_match(candidate: &str, expected: &str) -> bool {
    if candidate.len() != expected.len() {
        return false;
    }
    candidate.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Computes a signed header value for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
