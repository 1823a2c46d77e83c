//! Subscription lifecycle handlers.

use async_trait::async_trait;

use crate::domain::webhook::{
    SubscriptionObject, WebhookError, WebhookEvent, WebhookEventHandler, WebhookEventType,
};

/// Handles subscription creation and updates.
pub struct SubscriptionChangeHandler;

#[async_trait]
impl WebhookEventHandler for SubscriptionChangeHandler {
    fn handles(&self) -> Vec<WebhookEventType> {
        vec![
            WebhookEventType::SubscriptionCreated,
            WebhookEventType::SubscriptionUpdated,
        ]
    }

    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let subscription: SubscriptionObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::PayloadParsing(e.to_string()))?;

        // Update events carry the attributes that changed; surface a status
        // transition when one happened.
        let previous_status = event
            .data
            .previous_attributes
            .as_ref()
            .and_then(|attrs| attrs.get("status"))
            .and_then(|s| s.as_str());

        match previous_status {
            Some(from) if from != subscription.status => {
                tracing::info!(
                    event_id = %event.id,
                    subscription = %subscription.id,
                    customer = %subscription.customer,
                    from = %from,
                    to = %subscription.status,
                    "Subscription status changed"
                );
            }
            _ => {
                tracing::info!(
                    event_id = %event.id,
                    subscription = %subscription.id,
                    customer = %subscription.customer,
                    status = %subscription.status,
                    "Subscription changed"
                );
            }
        }

        Ok(())
    }
}

/// Handles subscription deletion: access ends at the period boundary.
pub struct SubscriptionCancellationHandler;

#[async_trait]
impl WebhookEventHandler for SubscriptionCancellationHandler {
    fn handles(&self) -> Vec<WebhookEventType> {
        vec![WebhookEventType::SubscriptionDeleted]
    }

    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let subscription: SubscriptionObject = event
            .deserialize_object()
            .map_err(|e| WebhookError::PayloadParsing(e.to_string()))?;

        tracing::info!(
            event_id = %event.id,
            subscription = %subscription.id,
            customer = %subscription.customer,
            period_end = subscription.current_period_end.unwrap_or_default(),
            "Subscription cancelled"
        );

        Ok(())
    }
}
