//! In-memory settings store.
//!
//! Two sources decide whether ads are on: the loaded configuration and a
//! runtime switch the host flips (e.g. after a "remove ads" purchase). Both
//! must allow ads for [`SettingsReader::ads_enabled`] to report `true`.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::ports::SettingsReader;

/// Thread-safe settings backed by atomics.
#[derive(Debug)]
pub struct RuntimeSettings {
    configured_enabled: bool,
    runtime_enabled: AtomicBool,
    interstitial_delay_threshold: AtomicU32,
}

impl RuntimeSettings {
    pub fn new(configured_enabled: bool, interstitial_delay_threshold: u32) -> Self {
        Self {
            configured_enabled,
            runtime_enabled: AtomicBool::new(true),
            interstitial_delay_threshold: AtomicU32::new(interstitial_delay_threshold),
        }
    }

    /// Runtime switch; does not override a configuration that disables ads.
    pub fn set_ads_enabled(&self, enabled: bool) {
        self.runtime_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn set_interstitial_delay_threshold(&self, threshold: u32) {
        self.interstitial_delay_threshold
            .store(threshold, Ordering::SeqCst);
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self::new(true, 0)
    }
}

impl SettingsReader for RuntimeSettings {
    fn ads_enabled(&self) -> bool {
        self.configured_enabled && self.runtime_enabled.load(Ordering::SeqCst)
    }

    fn interstitial_delay_threshold(&self) -> u32 {
        self.interstitial_delay_threshold.load(Ordering::SeqCst)
    }
}
