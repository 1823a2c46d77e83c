//! Webhook verification configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::webhook::WebhookVerifier;

use super::error::ValidationError;

/// Webhook verification configuration (Stripe)
#[derive(Debug, Deserialize)]
pub struct WebhookConfig {
    /// Webhook signing secret from the provider dashboard
    pub signing_secret: SecretString,

    /// Previous signing secret, accepted during rotation overlap
    #[serde(default)]
    pub previous_signing_secret: Option<SecretString>,

    /// Replay/clock-skew tolerance window in seconds
    #[serde(default = "default_tolerance_seconds")]
    pub tolerance_seconds: i64,

    /// Reject test-mode events regardless of environment
    #[serde(default)]
    pub require_livemode: bool,
}

impl WebhookConfig {
    /// Build the verifier from this configuration.
    pub fn verifier(&self) -> WebhookVerifier {
        let mut verifier = WebhookVerifier::new(self.signing_secret.clone())
            .with_tolerance(self.tolerance_seconds);
        if let Some(previous) = &self.previous_signing_secret {
            verifier = verifier.with_previous_secret(previous.clone());
        }
        verifier
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.signing_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "HOBBYIST__WEBHOOK__SIGNING_SECRET",
            ));
        }

        // Verify secret prefixes for safety
        if !self.signing_secret.expose_secret().starts_with("whsec_") {
            return Err(ValidationError::InvalidWebhookSecret);
        }
        if let Some(previous) = &self.previous_signing_secret {
            if !previous.expose_secret().starts_with("whsec_") {
                return Err(ValidationError::InvalidWebhookSecret);
            }
        }

        if self.tolerance_seconds <= 0 || self.tolerance_seconds > 3600 {
            return Err(ValidationError::InvalidToleranceWindow);
        }

        Ok(())
    }
}

fn default_tolerance_seconds() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(secret: &str) -> WebhookConfig {
        WebhookConfig {
            signing_secret: SecretString::new(secret.to_string()),
            previous_signing_secret: None,
            tolerance_seconds: default_tolerance_seconds(),
            require_livemode: false,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(config_with("whsec_abc123").validate().is_ok());
    }

    #[test]
    fn empty_secret_fails() {
        assert!(matches!(
            config_with("").validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn wrong_secret_prefix_fails() {
        assert!(matches!(
            config_with("sk_test_abc").validate(),
            Err(ValidationError::InvalidWebhookSecret)
        ));
    }

    #[test]
    fn wrong_previous_secret_prefix_fails() {
        let mut config = config_with("whsec_new");
        config.previous_signing_secret = Some(SecretString::new("secret_old".to_string()));

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWebhookSecret)
        ));
    }

    #[test]
    fn nonpositive_tolerance_fails() {
        let mut config = config_with("whsec_abc");
        config.tolerance_seconds = 0;

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidToleranceWindow)
        ));
    }

    #[test]
    fn oversized_tolerance_fails() {
        let mut config = config_with("whsec_abc");
        config.tolerance_seconds = 86400;

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidToleranceWindow)
        ));
    }

    #[test]
    fn default_tolerance_is_five_minutes() {
        assert_eq!(default_tolerance_seconds(), 300);
    }
}
