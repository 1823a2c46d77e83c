//! HTTP handlers for webhook endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::WebhookPipeline;
use crate::domain::webhook::WebhookError;

use super::dto::ErrorResponse;

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookAppState {
    pub pipeline: Arc<WebhookPipeline>,
}

/// `POST /webhooks/stripe`
///
/// The body must reach the pipeline as the exact bytes received; any
/// re-encoding would invalidate the signature, so the extractor is `Bytes`,
/// never a JSON extractor.
pub async fn handle_stripe_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    // A missing header parses as a header without timestamp, so the
    // pipeline rejects and reports it like any other malformed header.
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    state.pipeline.process(&body, signature).await?;

    Ok(StatusCode::OK)
}

/// Converts pipeline errors into provider-facing HTTP responses.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let code = match &self.0 {
            WebhookError::MalformedHeader(_) => "MALFORMED_HEADER",
            WebhookError::InvalidTimestamp => "INVALID_TIMESTAMP",
            WebhookError::TimestampOutOfRange { .. } => "TIMESTAMP_OUT_OF_RANGE",
            WebhookError::SignatureMismatch => "SIGNATURE_MISMATCH",
            WebhookError::PayloadParsing(_) => "PAYLOAD_PARSING",
            WebhookError::TestModeRejected => "TEST_MODE_REJECTED",
            WebhookError::HandlerFailed { .. } => "HANDLER_FAILED",
        };
        let body = ErrorResponse::new(code, self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}
