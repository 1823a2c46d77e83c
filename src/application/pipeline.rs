//! Webhook pipeline - orchestrates verification and dispatch.
//!
//! Per-request flow: Received -> HeaderParsed -> TimestampValid ->
//! SignatureValid -> Decoded -> Dispatched. The first failed gate is
//! terminal; no stage is re-entered and nothing is retried here (redelivery
//! is the provider's job, driven by the HTTP status the transport returns).
//!
//! Every terminal rejection reports exactly one [`SecurityEvent`] to the
//! monitoring sink before the error reaches the caller. Successful
//! dispatches report none.

use std::sync::Arc;

use crate::domain::security::{SecurityEvent, SecurityEventKind, Severity};
use crate::domain::webhook::{
    DispatchOutcome, SignatureHeader, WebhookDispatcher, WebhookError, WebhookVerifier,
};
use crate::ports::SecurityMonitor;

/// The inbound webhook pipeline.
///
/// Explicitly constructed with its secret(s), tolerance, routing table, and
/// security sink; all fields are immutable after startup and safe for
/// concurrent use.
pub struct WebhookPipeline {
    verifier: WebhookVerifier,
    dispatcher: Arc<dyn WebhookDispatcher>,
    monitor: Arc<dyn SecurityMonitor>,
    require_livemode: bool,
}

impl WebhookPipeline {
    pub fn new(
        verifier: WebhookVerifier,
        dispatcher: Arc<dyn WebhookDispatcher>,
        monitor: Arc<dyn SecurityMonitor>,
    ) -> Self {
        Self {
            verifier,
            dispatcher,
            monitor,
            require_livemode: false,
        }
    }

    /// Rejects test-mode events after authentication. Enabled in production.
    pub fn require_livemode(mut self, required: bool) -> Self {
        self.require_livemode = required;
        self
    }

    /// Processes one raw webhook delivery.
    ///
    /// # Errors
    ///
    /// Any [`WebhookError`]; each maps to a provider-facing HTTP status via
    /// [`WebhookError::status_code`]. A security event has already been
    /// reported by the time the error is returned.
    pub async fn process(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<DispatchOutcome, WebhookError> {
        match self.run(payload, signature_header).await {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                self.monitor.record(security_event_for(&error)).await;
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<DispatchOutcome, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;
        let verified = self.verifier.verify(payload, &header)?;

        // Decoding strictly after authentication: unauthenticated senders
        // must not reach the parser.
        let event = verified.decode()?;

        if self.require_livemode && event.is_test() {
            tracing::warn!(event_id = %event.id, "Rejected test mode event");
            return Err(WebhookError::TestModeRejected);
        }

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            "Webhook verified"
        );

        self.dispatcher
            .dispatch(&event)
            .await
            .map_err(|e| match e {
                // Keep handler-originated context; wrap everything else so
                // the transport can tell handler failures from verification
                // failures.
                WebhookError::HandlerFailed { .. } => e,
                other => WebhookError::HandlerFailed {
                    event_type: event.event_type.clone(),
                    message: other.to_string(),
                },
            })
    }
}

/// Maps a terminal rejection to the security event reported for it.
fn security_event_for(error: &WebhookError) -> SecurityEvent {
    match error {
        WebhookError::MalformedHeader(reason) => {
            SecurityEvent::new(SecurityEventKind::ValidationFailed, Severity::Warning)
                .with_metadata("reason", "malformed_header")
                .with_metadata("detail", *reason)
        }
        WebhookError::InvalidTimestamp => {
            SecurityEvent::new(SecurityEventKind::ValidationFailed, Severity::Warning)
                .with_metadata("reason", "invalid_timestamp")
        }
        WebhookError::TimestampOutOfRange { delta_secs } => {
            SecurityEvent::new(SecurityEventKind::ReplaySuspected, Severity::High)
                .with_metadata("reason", "timestamp_out_of_range")
                .with_metadata("delta_secs", delta_secs.to_string())
        }
        WebhookError::SignatureMismatch => {
            SecurityEvent::new(SecurityEventKind::ValidationFailed, Severity::High)
                .with_metadata("reason", "signature_mismatch")
        }
        // Authenticated sender sent something unexpected: more likely a
        // schema change or provider bug than an attack.
        WebhookError::PayloadParsing(detail) => {
            SecurityEvent::new(SecurityEventKind::OtherAnomaly, Severity::Warning)
                .with_metadata("reason", "payload_parsing")
                .with_metadata("detail", detail.clone())
        }
        WebhookError::TestModeRejected => {
            SecurityEvent::new(SecurityEventKind::OtherAnomaly, Severity::Warning)
                .with_metadata("reason", "test_mode_rejected")
        }
        WebhookError::HandlerFailed {
            event_type,
            message,
        } => SecurityEvent::new(SecurityEventKind::OtherAnomaly, Severity::Warning)
            .with_metadata("reason", "handler_failure")
            .with_metadata("event_type", event_type.clone())
            .with_metadata("detail", message.clone()),
    }
}
