//! Debug-menu gesture configuration

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::ads::GestureSettings;

/// Tap detector tuning
#[derive(Debug, Clone, Deserialize)]
pub struct DebugGestureConfig {
    /// Largest gap between taps of one sequence, in milliseconds
    #[serde(default = "default_debounce_window_ms")]
    pub debounce_window_ms: u64,

    /// Taps needed to open the test UI
    #[serde(default = "default_required_taps")]
    pub required_taps: u32,
}

impl DebugGestureConfig {
    pub fn settings(&self) -> Result<GestureSettings, ValidationError> {
        let window = Duration::milliseconds(self.debounce_window_ms.min(i64::MAX as u64) as i64);
        GestureSettings::new(window, self.required_taps)
            .map_err(|_| ValidationError::InvalidGestureTaps)
    }

    /// Validate gesture configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.settings().map(|_| ())
    }
}

impl Default for DebugGestureConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: default_debounce_window_ms(),
            required_taps: default_required_taps(),
        }
    }
}

fn default_debounce_window_ms() -> u64 {
    500
}

fn default_required_taps() -> u32 {
    5
}
