//! Hobbyist webhook service entry point.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hobbyist_webhooks::adapters::http::{webhook_router, WebhookAppState};
use hobbyist_webhooks::adapters::security::{HttpSecurityMonitor, TracingSecurityMonitor};
use hobbyist_webhooks::application::handlers::{
    PaymentFailureHandler, PaymentSuccessHandler, SubscriptionCancellationHandler,
    SubscriptionChangeHandler,
};
use hobbyist_webhooks::application::WebhookPipeline;
use hobbyist_webhooks::config::AppConfig;
use hobbyist_webhooks::domain::webhook::HandlerRegistry;
use hobbyist_webhooks::ports::SecurityMonitor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(PaymentSuccessHandler));
    registry.register(Arc::new(PaymentFailureHandler));
    registry.register(Arc::new(SubscriptionChangeHandler));
    registry.register(Arc::new(SubscriptionCancellationHandler));

    let monitor: Arc<dyn SecurityMonitor> = match &config.security.monitor_url {
        Some(url) => Arc::new(HttpSecurityMonitor::new(url.clone())),
        None => Arc::new(TracingSecurityMonitor),
    };

    let pipeline = WebhookPipeline::new(config.webhook.verifier(), Arc::new(registry), monitor)
        .require_livemode(config.is_production() || config.webhook.require_livemode);

    let state = WebhookAppState {
        pipeline: Arc::new(pipeline),
    };
    let app = webhook_router().with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Webhook service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
