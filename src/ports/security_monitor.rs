//! Security monitoring port.

use async_trait::async_trait;

use crate::domain::security::SecurityEvent;

/// Sink for security events.
///
/// Deliberately a single narrow method so the verification core knows
/// nothing about the monitoring backend. Implementations are best-effort:
/// the method is infallible from the caller's perspective, and adapters
/// must swallow their own delivery failures rather than let them reach the
/// verification path.
#[async_trait]
pub trait SecurityMonitor: Send + Sync {
    /// Records a security event. Fire-and-forget.
    async fn record(&self, event: SecurityEvent);
}
