//! Event vocabulary shared by providers, the relay and the event bus.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::AdTag;

/// Lifecycle events a provider emits, republished verbatim as public
/// notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderEvent {
    InterstitialClosed,
    GrantReward,
    BannerDisplayed,
    BannerRemoved,
}

impl ProviderEvent {
    pub const ALL: [ProviderEvent; 4] = [
        ProviderEvent::InterstitialClosed,
        ProviderEvent::GrantReward,
        ProviderEvent::BannerDisplayed,
        ProviderEvent::BannerRemoved,
    ];
}

impl fmt::Display for ProviderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderEvent::InterstitialClosed => "interstitial_closed",
            ProviderEvent::GrantReward => "grant_reward",
            ProviderEvent::BannerDisplayed => "banner_displayed",
            ProviderEvent::BannerRemoved => "banner_removed",
        };
        write!(f, "{}", s)
    }
}

/// Cross-cutting signals carried by the application event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusEvent {
    /// An ad is about to take over the screen; background music should pause.
    SuspendMusicForAd,
    /// The ad finished; background music may resume.
    ResumeMusicAfterAd,
    /// Ads were turned off globally (e.g. a "remove ads" purchase).
    AdsDisabled,
    /// Some module asked for a specific placement to be displayed.
    DisplayAdPlacement { tag: AdTag },
}

impl BusEvent {
    pub const SUSPEND_MUSIC: &'static str = "ads.music.suspend";
    pub const RESUME_MUSIC: &'static str = "ads.music.resume";
    pub const ADS_DISABLED: &'static str = "ads.disabled";
    pub const DISPLAY_PLACEMENT: &'static str = "ads.placement.display";

    /// Routing key used by bus subscriptions.
    pub fn event_type(&self) -> &'static str {
        match self {
            BusEvent::SuspendMusicForAd => Self::SUSPEND_MUSIC,
            BusEvent::ResumeMusicAfterAd => Self::RESUME_MUSIC,
            BusEvent::AdsDisabled => Self::ADS_DISABLED,
            BusEvent::DisplayAdPlacement { .. } => Self::DISPLAY_PLACEMENT,
        }
    }
}
