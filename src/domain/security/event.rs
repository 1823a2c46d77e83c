//! Security events emitted on rejection paths.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Category of a security event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventKind {
    /// A webhook failed signature or structural validation.
    ValidationFailed,
    /// A timestamp outside the tolerance window; possible replay.
    ReplaySuspected,
    /// Authenticated but otherwise notable activity.
    OtherAnomaly,
}

/// Severity of a security event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    High,
    Critical,
}

/// An event reported to the security monitoring sink.
///
/// Created on every terminal-reject path of the webhook pipeline, never
/// mutated afterwards, and delivered fire-and-forget.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityEvent {
    /// Unique event identifier.
    pub id: Uuid,

    /// When the event was created.
    pub occurred_at: DateTime<Utc>,

    pub kind: SecurityEventKind,

    pub severity: Severity,

    /// Context for the monitoring system (failure reason, event id,
    /// timestamp delta, ...). String-valued to keep the sink schema-free.
    pub metadata: BTreeMap<String, String>,
}

impl SecurityEvent {
    pub fn new(kind: SecurityEventKind, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
            severity,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
