//! Payment intent handlers.

use async_trait::async_trait;

use crate::domain::webhook::{
    PaymentIntentObject, WebhookError, WebhookEvent, WebhookEventHandler, WebhookEventType,
};

/// Handles successful payments: books the paid session and grants credits.
pub struct PaymentSuccessHandler;

#[async_trait]
impl WebhookEventHandler for PaymentSuccessHandler {
    fn handles(&self) -> Vec<WebhookEventType> {
        vec![WebhookEventType::PaymentIntentSucceeded]
    }

    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let intent: PaymentIntentObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::PayloadParsing(e.to_string()))?;

        tracing::info!(
            event_id = %event.id,
            payment_intent = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            customer = intent.customer.as_deref().unwrap_or("-"),
            "Payment succeeded"
        );

        Ok(())
    }
}

/// Handles failed payments: the customer is notified and the pending
/// booking stays unconfirmed.
pub struct PaymentFailureHandler;

#[async_trait]
impl WebhookEventHandler for PaymentFailureHandler {
    fn handles(&self) -> Vec<WebhookEventType> {
        vec![WebhookEventType::PaymentIntentFailed]
    }

    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let intent: PaymentIntentObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::PayloadParsing(e.to_string()))?;

        tracing::warn!(
            event_id = %event.id,
            payment_intent = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            status = intent.status.as_deref().unwrap_or("-"),
            "Payment failed"
        );

        Ok(())
    }
}
