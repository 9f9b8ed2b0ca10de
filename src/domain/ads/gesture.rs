//! Hidden debug-menu gesture: a burst of quick taps opens the provider's
//! test UI.

use chrono::Duration;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Tuning for the tap detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSettings {
    /// Largest gap between two taps that still continues a sequence.
    pub debounce_window: Duration,
    /// Taps needed to trigger.
    pub required_taps: u32,
}

impl GestureSettings {
    pub fn new(debounce_window: Duration, required_taps: u32) -> Result<Self, ValidationError> {
        if required_taps == 0 {
            return Err(ValidationError::below_minimum("required_taps", 1, 0));
        }
        if debounce_window < Duration::zero() {
            return Err(ValidationError::below_minimum(
                "debounce_window_ms",
                0,
                debounce_window.num_milliseconds(),
            ));
        }
        Ok(Self {
            debounce_window,
            required_taps,
        })
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            debounce_window: Duration::milliseconds(500),
            required_taps: 5,
        }
    }
}

/// Debounced tap counter.
#[derive(Debug, Clone)]
pub struct DebugGesture {
    settings: GestureSettings,
    clicks: u32,
    last_click: Option<Timestamp>,
}

impl DebugGesture {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            clicks: 0,
            last_click: None,
        }
    }

    pub fn click_count(&self) -> u32 {
        self.clicks
    }

    /// Records one tap. Returns `true` when this tap completes the sequence,
    /// in which case the count starts over from zero.
    pub fn register_tap(&mut self, now: Timestamp) -> bool {
        let continues = self
            .last_click
            .map(|last| now.duration_since(&last) <= self.settings.debounce_window)
            .unwrap_or(false);

        // A tap always counts itself, even when it starts a new sequence.
        self.clicks = if continues { self.clicks + 1 } else { 1 };
        self.last_click = Some(now);

        if self.clicks >= self.settings.required_taps {
            self.clicks = 0;
            return true;
        }
        false
    }
}

impl Default for DebugGesture {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}
