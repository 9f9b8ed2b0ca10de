//! SettingsReader port - Read-only view of the ads settings store.

/// Port for reading the ads settings.
///
/// Values are re-read on every coordinator call, so a store that changes at
/// runtime takes effect immediately.
pub trait SettingsReader: Send + Sync {
    /// Global ads toggle.
    fn ads_enabled(&self) -> bool;

    /// Number of gated attempts required before a between-level ad may show.
    ///
    /// Negative values are rejected when the settings are loaded, so the port
    /// only ever exposes a non-negative count.
    fn interstitial_delay_threshold(&self) -> u32;
}
