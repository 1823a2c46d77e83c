//! Security monitoring configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Security monitoring configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Endpoint of the external monitoring service. When unset, security
    /// events go to the structured log instead.
    pub monitor_url: Option<String>,
}

impl SecurityConfig {
    /// Validate security configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.monitor_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidMonitorUrl);
            }
        }
        Ok(())
    }
}
