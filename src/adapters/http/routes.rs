//! Axum router configuration for webhook endpoints.

use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{handle_stripe_webhook, WebhookAppState};

/// Create the webhook routes.
///
/// # Routes
/// - `POST /stripe` - Stripe webhook deliveries (signature verified, no
///   user authentication)
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/stripe", post(handle_stripe_webhook))
}

/// Create the complete webhook router, suitable for serving directly or
/// nesting under an API gateway prefix.
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new()
        .nest("/webhooks", webhook_routes())
        .layer(TraceLayer::new_for_http())
}
