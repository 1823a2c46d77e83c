//! Webhook domain module.
//!
//! Implements the verification pipeline for inbound Stripe webhooks:
//! signature-header parsing, timestamp/replay defense, HMAC-SHA256
//! verification with secret rotation, and typed event decoding.
//!
//! # Module Structure
//!
//! - `signature` - Stripe-Signature header parsing
//! - `verifier` - timestamp guard, signature computation, constant-time check
//! - `event` - decoded webhook event and event-type routing tags
//! - `objects` - typed shapes handlers decode from the opaque event data
//! - `dispatch` - handler trait and event-type registry
//! - `errors` - webhook error taxonomy with HTTP mapping

mod dispatch;
mod errors;
mod event;
mod objects;
mod signature;
mod verifier;

pub use dispatch::{DispatchOutcome, HandlerRegistry, WebhookDispatcher, WebhookEventHandler};
pub use errors::WebhookError;
pub use event::{WebhookEvent, WebhookEventData, WebhookEventType};
pub use objects::{PaymentIntentObject, SubscriptionObject};
pub use signature::SignatureHeader;
pub use verifier::{VerifiedPayload, WebhookVerifier};

#[cfg(test)]
pub use event::WebhookEventBuilder;
#[cfg(test)]
pub use verifier::compute_test_signature;
