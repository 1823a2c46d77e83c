//! Webhook error taxonomy.
//!
//! Every error here is terminal for the current request: a failed gate
//! short-circuits the pipeline, and retries (if any) are driven by the
//! HTTP status the transport returns to the provider.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook verification and dispatch.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature header is missing its timestamp or all signatures.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(&'static str),

    /// Header timestamp is not parseable as an integer.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Header timestamp is outside the tolerance window. Treated as a
    /// suspected replay in either direction.
    #[error("Timestamp out of range ({delta_secs}s from now)")]
    TimestampOutOfRange { delta_secs: i64 },

    /// None of the provided signatures matched any configured secret.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Payload passed authentication but failed structural decoding.
    #[error("Payload parsing failed: {0}")]
    PayloadParsing(String),

    /// A test-mode event arrived while live mode is required.
    #[error("Test mode event rejected")]
    TestModeRejected,

    /// A registered business handler failed. Opaque to the pipeline;
    /// surfaced so the transport can signal a provider retry.
    #[error("Handler failed for {event_type}: {message}")]
    HandlerFailed { event_type: String, message: String },
}

impl WebhookError {
    /// Returns true if the provider should retry delivering this webhook.
    ///
    /// Only handler failures are retryable: authentication and parsing
    /// failures will fail identically on every redelivery.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::HandlerFailed { .. })
    }

    /// Maps the error to the HTTP status the transport layer returns.
    ///
    /// Status codes determine the provider's retry behavior:
    /// - 4xx: request is bad or unauthenticated, no retry helps
    /// - 5xx: our side failed, the provider will retry per its policy
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Authentication failures
            WebhookError::SignatureMismatch | WebhookError::TimestampOutOfRange { .. } => {
                StatusCode::UNAUTHORIZED
            }

            // Malformed requests
            WebhookError::MalformedHeader(_)
            | WebhookError::InvalidTimestamp
            | WebhookError::PayloadParsing(_)
            | WebhookError::TestModeRejected => StatusCode::BAD_REQUEST,

            // Handler failures trigger provider-side redelivery
            WebhookError::HandlerFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
