//! HTTP security monitor.
//!
//! Forwards security events to an external monitoring endpoint. Delivery is
//! spawned and never awaited by the pipeline: the authentication gate must
//! not block on, or fail because of, the monitoring backend.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::security::SecurityEvent;
use crate::ports::SecurityMonitor;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts security events as JSON to a monitoring service.
pub struct HttpSecurityMonitor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSecurityMonitor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SecurityMonitor for HttpSecurityMonitor {
    async fn record(&self, event: SecurityEvent) {
        let request = self.client.post(&self.endpoint).json(&event);
        let event_id = event.id;

        tokio::spawn(async move {
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(
                        security_event_id = %event_id,
                        status = %response.status(),
                        "Security monitor rejected event"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        security_event_id = %event_id,
                        error = %e,
                        "Failed to deliver security event"
                    );
                }
                Ok(_) => {}
            }
        });
    }
}
