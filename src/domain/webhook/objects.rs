//! Typed shapes for event data objects.
//!
//! The pipeline treats `WebhookEvent.data` as opaque; these are the concrete
//! shapes the registered handlers decode lazily, capturing only the fields
//! the platform acts on.

use serde::Deserialize;

/// A payment intent, as carried by `payment_intent.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentObject {
    /// Payment intent identifier (pi_xxx format).
    pub id: String,

    /// Amount in the smallest currency unit (e.g. cents).
    pub amount: i64,

    /// Three-letter ISO currency code.
    pub currency: String,

    /// Customer the payment belongs to, when attached.
    #[serde(default)]
    pub customer: Option<String>,

    /// Provider-side status string.
    #[serde(default)]
    pub status: Option<String>,
}

/// A subscription, as carried by `customer.subscription.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    /// Subscription identifier (sub_xxx format).
    pub id: String,

    /// Owning customer identifier.
    pub customer: String,

    /// Provider-side status (active, past_due, canceled, ...).
    pub status: String,

    /// End of the current billing period (Unix seconds).
    #[serde(default)]
    pub current_period_end: Option<i64>,

    /// Whether the subscription is set to cancel at period end.
    #[serde(default)]
    pub cancel_at_period_end: bool,
}
