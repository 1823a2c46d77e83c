//! Security domain module.
//!
//! Types describing validation failures and suspicious activity reported to
//! the external security monitoring sink.

mod event;

pub use event::{SecurityEvent, SecurityEventKind, Severity};
