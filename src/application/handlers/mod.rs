//! Business handlers for the webhook event families the platform acts on.
//!
//! Each handler decodes the event's opaque data object into the concrete
//! shape it needs. Booking, credit, and subscription persistence live
//! behind external services; these handlers are the seam where those calls
//! are made.

mod payment;
mod subscription;

pub use payment::{PaymentFailureHandler, PaymentSuccessHandler};
pub use subscription::{SubscriptionCancellationHandler, SubscriptionChangeHandler};
