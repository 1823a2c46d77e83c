//! Security monitor adapters.
//!
//! Two sinks: structured logs for development and single-node deployments,
//! and an HTTP forwarder for an external monitoring service. Both are
//! best-effort; neither lets a delivery failure reach the caller.

mod http_monitor;
mod tracing_monitor;

pub use http_monitor::HttpSecurityMonitor;
pub use tracing_monitor::TracingSecurityMonitor;
