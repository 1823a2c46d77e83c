//! Tracing-backed security monitor.

use async_trait::async_trait;

use crate::domain::security::{SecurityEvent, Severity};
use crate::ports::SecurityMonitor;

/// Emits security events as structured log records.
pub struct TracingSecurityMonitor;

#[async_trait]
impl SecurityMonitor for TracingSecurityMonitor {
    async fn record(&self, event: SecurityEvent) {
        let metadata = serde_json::to_string(&event.metadata).unwrap_or_default();
        match event.severity {
            Severity::Info => tracing::info!(
                security_event_id = %event.id,
                kind = ?event.kind,
                %metadata,
                "Security event"
            ),
            Severity::Warning => tracing::warn!(
                security_event_id = %event.id,
                kind = ?event.kind,
                %metadata,
                "Security event"
            ),
            Severity::High | Severity::Critical => tracing::error!(
                security_event_id = %event.id,
                kind = ?event.kind,
                %metadata,
                "Security event"
            ),
        }
    }
}
