//! Event dispatch - routes verified events to business handlers.
//!
//! Routing is a static event-type map built at startup. Unknown event types
//! are acknowledged without error: the provider may introduce new types at
//! any time, and a delivery must not fail because the receiver is outdated.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::errors::WebhookError;
use super::event::{WebhookEvent, WebhookEventType};

/// Outcome of a dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered handler processed the event.
    Handled,
    /// No handler is registered for the type; acknowledged as success.
    Acknowledged,
}

/// Handler for one or more webhook event types.
///
/// Implementations should be stateless and decode the event's data object
/// themselves; the pipeline does not interpret it.
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    /// The event type(s) this handler processes.
    fn handles(&self) -> Vec<WebhookEventType>;

    /// Handles a verified event. Errors propagate to the transport layer
    /// as a retry-triggering status.
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError>;
}

/// Routes verified events to the correct handler by event type.
#[async_trait]
pub trait WebhookDispatcher: Send + Sync {
    /// Find the handler registered for the given event type.
    fn handler_for(&self, event_type: WebhookEventType) -> Option<&dyn WebhookEventHandler>;

    /// Dispatch an event to its handler.
    ///
    /// Unregistered and unknown event types return
    /// [`DispatchOutcome::Acknowledged`], never an error.
    async fn dispatch(&self, event: &WebhookEvent) -> Result<DispatchOutcome, WebhookError> {
        match self.handler_for(event.parsed_type()) {
            Some(handler) => {
                handler.handle(event).await?;
                Ok(DispatchOutcome::Handled)
            }
            None => {
                tracing::info!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "No handler registered for event type, acknowledging"
                );
                Ok(DispatchOutcome::Acknowledged)
            }
        }
    }
}

/// Static handler registry keyed by event type.
///
/// Built once at startup and shared read-only across requests.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<WebhookEventType, Arc<dyn WebhookEventHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every event type it declares.
    ///
    /// Registering a second handler for the same type replaces the first.
    pub fn register(&mut self, handler: Arc<dyn WebhookEventHandler>) {
        for event_type in handler.handles() {
            self.handlers.insert(event_type, handler.clone());
        }
    }

    /// Number of event types with a registered handler.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl WebhookDispatcher for HandlerRegistry {
    fn handler_for(&self, event_type: WebhookEventType) -> Option<&dyn WebhookEventHandler> {
        self.handlers.get(&event_type).map(|h| h.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::WebhookEventBuilder;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingHandler {
        handles_types: Vec<WebhookEventType>,
        calls: AtomicU32,
        fail: bool,
    }

    impl CountingHandler {
        fn new(handles: Vec<WebhookEventType>) -> Self {
            Self {
                handles_types: handles,
                calls: AtomicU32::new(0),
                fail: false,
            }
        }

        fn failing(handles: Vec<WebhookEventType>) -> Self {
            Self {
                handles_types: handles,
                calls: AtomicU32::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WebhookEventHandler for CountingHandler {
        fn handles(&self) -> Vec<WebhookEventType> {
            self.handles_types.clone()
        }

        async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(WebhookError::HandlerFailed {
                    event_type: event.event_type.clone(),
                    message: "simulated failure".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Registry Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn registry_maps_every_declared_type() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(CountingHandler::new(vec![
            WebhookEventType::SubscriptionCreated,
            WebhookEventType::SubscriptionUpdated,
        ])));

        assert_eq!(registry.len(), 2);
        assert!(registry
            .handler_for(WebhookEventType::SubscriptionCreated)
            .is_some());
        assert!(registry
            .handler_for(WebhookEventType::SubscriptionUpdated)
            .is_some());
    }

    #[test]
    fn registry_returns_none_for_unregistered_type() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(CountingHandler::new(vec![
            WebhookEventType::PaymentIntentSucceeded,
        ])));

        assert!(registry
            .handler_for(WebhookEventType::ChargeFailed)
            .is_none());
    }

    #[test]
    fn registry_later_registration_wins() {
        let first = Arc::new(CountingHandler::new(vec![
            WebhookEventType::PaymentIntentSucceeded,
        ]));
        let second = Arc::new(CountingHandler::new(vec![
            WebhookEventType::PaymentIntentSucceeded,
        ]));

        let mut registry = HandlerRegistry::new();
        registry.register(first);
        registry.register(second);

        assert_eq!(registry.len(), 1);
    }

    // ══════════════════════════════════════════════════════════════
    // Dispatch Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn dispatch_routes_to_registered_handler() {
        let handler = Arc::new(CountingHandler::new(vec![
            WebhookEventType::PaymentIntentSucceeded,
        ]));
        let mut registry = HandlerRegistry::new();
        registry.register(handler.clone());

        let event = WebhookEventBuilder::new()
            .event_type("payment_intent.succeeded")
            .build();
        let outcome = registry.dispatch(&event).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(handler.calls(), 1);
    }

    #[tokio::test]
    async fn dispatch_acknowledges_unknown_event_type() {
        let handler = Arc::new(CountingHandler::new(vec![
            WebhookEventType::PaymentIntentSucceeded,
        ]));
        let mut registry = HandlerRegistry::new();
        registry.register(handler.clone());

        let event = WebhookEventBuilder::new()
            .event_type("plan.created")
            .build();
        let outcome = registry.dispatch(&event).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Acknowledged);
        assert_eq!(handler.calls(), 0);
    }

    #[tokio::test]
    async fn dispatch_acknowledges_known_but_unregistered_type() {
        let registry = HandlerRegistry::new();

        let event = WebhookEventBuilder::new()
            .event_type("invoice.payment_failed")
            .build();
        let outcome = registry.dispatch(&event).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Acknowledged);
    }

    #[tokio::test]
    async fn dispatch_propagates_handler_failure() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(CountingHandler::failing(vec![
            WebhookEventType::ChargeFailed,
        ])));

        let event = WebhookEventBuilder::new().event_type("charge.failed").build();
        let result = registry.dispatch(&event).await;

        assert!(matches!(result, Err(WebhookError::HandlerFailed { .. })));
    }
}
