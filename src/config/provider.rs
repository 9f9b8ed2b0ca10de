//! Ad provider selection

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::ProviderId;

/// Which registered network to activate at startup
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Registry key of the active provider
    #[serde(default = "default_active")]
    pub active: String,

    /// Whether the simulated network completes ads on its own
    #[serde(default = "default_simulated_auto_close")]
    pub simulated_auto_close: bool,
}

impl ProviderConfig {
    pub fn provider_id(&self) -> Result<ProviderId, ValidationError> {
        ProviderId::new(self.active.as_str())
            .map_err(|e| ValidationError::InvalidProviderId(e.to_string()))
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.provider_id().map(|_| ())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            active: default_active(),
            simulated_auto_close: default_simulated_auto_close(),
        }
    }
}

fn default_active() -> String {
    "simulated".to_string()
}

fn default_simulated_auto_close() -> bool {
    true
}
