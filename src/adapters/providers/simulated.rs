//! Simulated ad network.
//!
//! Stands in for a real network SDK during development and in tests: every
//! command is recorded, banner visibility is tracked, and with `auto_close`
//! on, each displayed interstitial or rewarded video immediately reports
//! completion as if the player had dismissed it.
//!
//! # Example
//!
//! ```ignore
//! let provider = Arc::new(SimulatedProvider::new().with_banner_height(50.0));
//! registry.register(provider.clone());
//!
//! coordinator.show_interstitial(&"pause".into());
//! assert_eq!(provider.calls(), vec![ProviderCall::ShowInterstitial("pause".into())]);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ads::ProviderEvent;
use crate::domain::foundation::{AdTag, ProviderId, SubscriptionId};
use crate::ports::{AdProvider, ProviderEventSink};

/// Registry key the simulated network registers under.
pub const SIMULATED_PROVIDER_ID: &str = "simulated";

/// A command received by the simulated network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    CacheInterstitial(AdTag),
    CacheRewardedVideo(AdTag),
    ShowBanner(AdTag),
    HideBanner,
    ShowInterstitial(AdTag),
    ShowRewardedVideo(AdTag),
    ShowTestUi,
}

#[derive(Default)]
struct Inner {
    calls: Vec<ProviderCall>,
    banner_visible: bool,
    sinks: HashMap<SubscriptionId, ProviderEventSink>,
}

/// In-process ad network with call tracking.
pub struct SimulatedProvider {
    id: ProviderId,
    auto_close: bool,
    banner_height: f32,
    inner: Mutex<Inner>,
}

impl SimulatedProvider {
    /// Creates a provider that auto-closes ads and reports a 50pt banner.
    pub fn new() -> Self {
        Self {
            id: ProviderId::from_static(SIMULATED_PROVIDER_ID),
            auto_close: true,
            banner_height: 50.0,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Registers under a different key, e.g. to stand in for a named network.
    pub fn with_id(mut self, id: ProviderId) -> Self {
        self.id = id;
        self
    }

    /// When off, completion events are only sent through [`emit`](Self::emit).
    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn with_banner_height(mut self, height: f32) -> Self {
        self.banner_height = height;
        self
    }

    /// Sends `event` to every subscribed sink.
    pub fn emit(&self, event: ProviderEvent) {
        let sinks: Vec<ProviderEventSink> = self.lock().sinks.values().cloned().collect();
        tracing::debug!(provider = %self.id, %event, sinks = sinks.len(), "Simulated provider event");
        for sink in sinks {
            sink.emit(event);
        }
    }

    // === Test Helpers ===

    /// Every command received so far, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().sinks.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: ProviderCall) {
        self.lock().calls.push(call);
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AdProvider for SimulatedProvider {
    fn id(&self) -> ProviderId {
        self.id.clone()
    }

    fn cache_interstitial(&self, tag: &AdTag) {
        self.record(ProviderCall::CacheInterstitial(tag.clone()));
    }

    fn cache_rewarded_video(&self, tag: &AdTag) {
        self.record(ProviderCall::CacheRewardedVideo(tag.clone()));
    }

    fn show_banner(&self, tag: &AdTag) {
        let newly_visible = {
            let mut inner = self.lock();
            inner.calls.push(ProviderCall::ShowBanner(tag.clone()));
            !std::mem::replace(&mut inner.banner_visible, true)
        };
        if newly_visible {
            self.emit(ProviderEvent::BannerDisplayed);
        }
    }

    fn hide_banner(&self) {
        let was_visible = {
            let mut inner = self.lock();
            inner.calls.push(ProviderCall::HideBanner);
            std::mem::replace(&mut inner.banner_visible, false)
        };
        if was_visible {
            self.emit(ProviderEvent::BannerRemoved);
        }
    }

    fn show_interstitial(&self, tag: &AdTag) {
        self.record(ProviderCall::ShowInterstitial(tag.clone()));
        if self.auto_close {
            self.emit(ProviderEvent::InterstitialClosed);
        }
    }

    fn show_rewarded_video(&self, tag: &AdTag) {
        self.record(ProviderCall::ShowRewardedVideo(tag.clone()));
        if self.auto_close {
            self.emit(ProviderEvent::GrantReward);
        }
    }

    fn banner_height(&self) -> f32 {
        if self.lock().banner_visible {
            self.banner_height
        } else {
            0.0
        }
    }

    fn is_banner_visible(&self) -> bool {
        self.lock().banner_visible
    }

    fn show_test_ui(&self) {
        self.record(ProviderCall::ShowTestUi);
    }

    fn subscribe(&self, sink: ProviderEventSink) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.lock().sinks.insert(id, sink);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().sinks.remove(&id);
    }
}
