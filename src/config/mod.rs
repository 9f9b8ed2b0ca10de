//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AD_MEDIATION` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use ad_mediation::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Active provider: {}", config.provider.active);
//! ```

mod ads;
mod debug_gesture;
mod error;
mod logging;
mod provider;

pub use ads::AdsConfig;
pub use debug_gesture::DebugGestureConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use provider::ProviderConfig;

use serde::Deserialize;

use crate::adapters::settings::RuntimeSettings;
use crate::application::CoordinatorConfig;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ads toggle, pacing threshold and continuation timeout
    #[serde(default)]
    pub ads: AdsConfig,

    /// Active network selection
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Debug-menu tap detector
    #[serde(default)]
    pub debug_gesture: DebugGestureConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AD_MEDIATION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AD_MEDIATION__ADS__ENABLED=false` -> `ads.enabled = false`
    /// - `AD_MEDIATION__ADS__INTERSTITIAL_DELAY_THRESHOLD=2` -> `ads.interstitial_delay_threshold = 2`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AD_MEDIATION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ads.validate()?;
        self.provider.validate()?;
        self.debug_gesture.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Settings source seeded from the ads section
    pub fn runtime_settings(&self) -> Result<RuntimeSettings, ValidationError> {
        Ok(RuntimeSettings::new(
            self.ads.enabled,
            self.ads.delay_threshold()?,
        ))
    }

    /// Coordinator tuning derived from the ads and gesture sections
    pub fn coordinator_config(&self) -> Result<CoordinatorConfig, ValidationError> {
        Ok(CoordinatorConfig::default()
            .with_callback_timeout(self.ads.callback_timeout())
            .with_gesture(self.debug_gesture.settings()?))
    }
}
