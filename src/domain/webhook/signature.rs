//! Stripe-Signature header parsing.

use super::errors::WebhookError;

/// Parsed components of the Stripe-Signature header.
///
/// The header format is `t=<timestamp>,v1=<signature>[,v1=<signature>...]`.
/// Multiple `v1` entries appear during signing-secret rotation, when Stripe
/// signs each delivery with both the old and the new secret.
///
/// The timestamp is kept in its original string form: the signed payload is
/// reconstructed from the exact characters the sender used, so re-formatting
/// a parsed integer could alter the HMAC input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp exactly as sent, not yet validated as numeric.
    pub timestamp: String,
    /// Candidate v1 signatures (hex strings), in header order.
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Segments without `=` and unknown keys are skipped for forward
    /// compatibility with new signature schemes.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedHeader` if the timestamp is missing
    /// or duplicated, or if no `v1` signature is present.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<String> = None;
        let mut signatures: Vec<String> = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "t" => {
                    if timestamp.is_some() {
                        return Err(WebhookError::MalformedHeader("duplicate timestamp"));
                    }
                    timestamp = Some(value.trim().to_string());
                }
                "v1" => {
                    signatures.push(value.trim().to_string());
                }
                _ => {
                    // Ignore unknown schemes (v0, future versions)
                }
            }
        }

        let timestamp = timestamp.ok_or(WebhookError::MalformedHeader("missing timestamp"))?;
        if signatures.is_empty() {
            return Err(WebhookError::MalformedHeader("no v1 signatures"));
        }

        Ok(SignatureHeader {
            timestamp,
            signatures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Header Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_single_signature() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v1={}", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1234567890");
        assert_eq!(header.signatures, vec![signature]);
    }

    #[test]
    fn parse_header_collects_multiple_signatures_in_order() {
        let first = "a".repeat(64);
        let second = "b".repeat(64);
        let header_str = format!("t=1234567890,v1={},v1={}", first, second);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.signatures, vec![first, second]);
    }

    #[test]
    fn parse_header_ignores_unknown_keys() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v0=legacy,v1={},scheme=hmac", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1234567890");
        assert_eq!(header.signatures.len(), 1);
    }

    #[test]
    fn parse_header_skips_segments_without_equals() {
        let signature = "c".repeat(64);
        let header_str = format!("garbage,t=1234567890,v1={}", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1234567890");
    }

    #[test]
    fn parse_header_trims_whitespace() {
        let header_str = "t= 1234567890 , v1 = abcdef";

        let header = SignatureHeader::parse(header_str).unwrap();

        assert_eq!(header.timestamp, "1234567890");
        assert_eq!(header.signatures, vec!["abcdef".to_string()]);
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let result = SignatureHeader::parse("v1=abcdef");

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_missing_signatures_fails() {
        let result = SignatureHeader::parse("t=1234567890");

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_duplicate_timestamp_fails() {
        let result = SignatureHeader::parse("t=1,t=2,v1=abcdef");

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_empty_header_fails() {
        let result = SignatureHeader::parse("");

        assert!(matches!(result, Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn parse_header_keeps_nonnumeric_timestamp() {
        // Numeric validation is the timestamp guard's job, not the parser's.
        let header = SignatureHeader::parse("t=not_a_number,v1=abcdef").unwrap();

        assert_eq!(header.timestamp, "not_a_number");
    }
}
