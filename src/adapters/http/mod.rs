//! HTTP ingress adapter.
//!
//! Connects Axum routes to the webhook pipeline. Webhook endpoints carry no
//! user authentication; requests are authenticated by their signature.

mod dto;
mod handlers;
mod routes;

pub use dto::ErrorResponse;
pub use handlers::{handle_stripe_webhook, WebhookAppState};
pub use routes::{webhook_router, webhook_routes};
