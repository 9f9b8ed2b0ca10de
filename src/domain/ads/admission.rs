//! Frequency-capping gate for between-level interstitials.

use super::SessionState;

/// Settings snapshot the gate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionSettings {
    pub ads_enabled: bool,
    pub interstitial_delay_threshold: u32,
}

/// Pure admission check.
///
/// An ad may be shown once the number of attempts since the last display
/// reaches the configured threshold. A threshold of zero admits every attempt.
pub fn can_show_between_level_ad(state: &SessionState, settings: &AdmissionSettings) -> bool {
    settings.ads_enabled && state.interstitial_counter() >= settings.interstitial_delay_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_counter(n: u32) -> SessionState {
        let mut state = SessionState::new();
        for _ in 0..n {
            state.increment_interstitial_counter();
        }
        state
    }

    fn settings(enabled: bool, threshold: u32) -> AdmissionSettings {
        AdmissionSettings {
            ads_enabled: enabled,
            interstitial_delay_threshold: threshold,
        }
    }

    #[test]
    fn zero_threshold_admits_every_attempt() {
        assert!(can_show_between_level_ad(&state_with_counter(0), &settings(true, 0)));
    }

    #[test]
    fn below_threshold_is_rejected() {
        assert!(!can_show_between_level_ad(&state_with_counter(1), &settings(true, 2)));
    }

    #[test]
    fn at_threshold_is_admitted() {
        assert!(can_show_between_level_ad(&state_with_counter(2), &settings(true, 2)));
        assert!(can_show_between_level_ad(&state_with_counter(5), &settings(true, 2)));
    }

    #[test]
    fn disabled_ads_are_never_admitted() {
        assert!(!can_show_between_level_ad(&state_with_counter(10), &settings(false, 0)));
    }
}
