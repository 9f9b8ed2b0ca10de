//! Ads settings configuration

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;

/// Longest continuation timeout accepted (one day)
pub const MAX_CALLBACK_TIMEOUT_SECS: u64 = 86_400;

/// Ads settings
#[derive(Debug, Clone, Deserialize)]
pub struct AdsConfig {
    /// Global ads toggle
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Gated between-level requests skipped before each ad is shown.
    /// Read as signed so a negative value is reported instead of failing to parse.
    #[serde(default)]
    pub interstitial_delay_threshold: i64,

    /// Seconds to wait for an interstitial close event before releasing the
    /// caller's continuation. Unset means wait indefinitely.
    pub pending_callback_timeout_secs: Option<u64>,
}

impl AdsConfig {
    /// Threshold as the non-negative count the settings port exposes
    pub fn delay_threshold(&self) -> Result<u32, ValidationError> {
        if self.interstitial_delay_threshold < 0 {
            return Err(ValidationError::NegativeDelayThreshold(
                self.interstitial_delay_threshold,
            ));
        }
        u32::try_from(self.interstitial_delay_threshold)
            .map_err(|_| ValidationError::DelayThresholdTooLarge)
    }

    /// Continuation timeout, if configured
    pub fn callback_timeout(&self) -> Option<Duration> {
        self.pending_callback_timeout_secs
            .map(|secs| Duration::seconds(secs.min(MAX_CALLBACK_TIMEOUT_SECS) as i64))
    }

    /// Validate ads configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.delay_threshold()?;
        match self.pending_callback_timeout_secs {
            Some(0) => return Err(ValidationError::InvalidCallbackTimeout),
            Some(secs) if secs > MAX_CALLBACK_TIMEOUT_SECS => {
                return Err(ValidationError::InvalidCallbackTimeout)
            }
            _ => {}
        }
        Ok(())
    }
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interstitial_delay_threshold: 0,
            pending_callback_timeout_secs: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}
