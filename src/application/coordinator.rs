//! AdSessionCoordinator - Entry point the host calls to cache and show ads.
//!
//! The coordinator owns the session state, consults the admission gate,
//! drives the active provider and broadcasts music suspend/resume signals.
//!
//! ## Disabled means silent
//!
//! Every operation is a no-op when ads are disabled or no provider is
//! active; queries return `0.0` / `false`. Exceptions:
//! - `hide_banner` only needs a provider, so a banner on screen can always
//!   be removed.
//! - `show_test_ui` only needs a provider, so the debug menu works with ads
//!   off.
//!
//! ## Threading
//!
//! The coordinator is single-threaded. Provider events and inbound bus
//! signals are queued in an inbox and applied when the owning thread calls
//! [`pump_events`](AdSessionCoordinator::pump_events) (e.g. once per frame)
//! or drives [`run`](AdSessionCoordinator::run).
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval` | 250ms | How often `run` checks the continuation deadline |
//! | `callback_timeout` | none | Deadline after which a pending continuation runs anyway |
//! | `gesture` | 500ms / 5 taps | Debug-menu tap detector |

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info, warn};

use super::event_relay::{broadcast, EventRelay, RelayFollowUp};
use super::{Notifications, ProviderRegistry};
use crate::domain::ads::{
    can_show_between_level_ad, AdCallback, AdmissionSettings, BusEvent, DebugGesture,
    GestureSettings, SessionState,
};
use crate::domain::foundation::AdTag;
use crate::ports::{AdProvider, Clock, EventBus, InboxMessage, SettingsReader};

/// Tuning for the coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// How often `run` checks the pending continuation deadline.
    pub poll_interval: StdDuration,

    /// Give up waiting for `InterstitialClosed` after this long.
    pub callback_timeout: Option<Duration>,

    /// Debug-menu tap detector settings.
    pub gesture: GestureSettings,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            poll_interval: StdDuration::from_millis(250),
            callback_timeout: None,
            gesture: GestureSettings::default(),
        }
    }
}

impl CoordinatorConfig {
    pub fn with_poll_interval(mut self, interval: StdDuration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_callback_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.callback_timeout = timeout;
        self
    }

    pub fn with_gesture(mut self, gesture: GestureSettings) -> Self {
        self.gesture = gesture;
        self
    }
}

/// Orchestrates caching, display and completion of ads for one process.
pub struct AdSessionCoordinator {
    settings: Arc<dyn SettingsReader>,
    bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    provider: Option<Arc<dyn AdProvider>>,
    config: CoordinatorConfig,
    state: SessionState,
    gesture: DebugGesture,
    relay: EventRelay,
    inbox: UnboundedReceiver<InboxMessage>,
}

impl AdSessionCoordinator {
    /// Creates a coordinator with default configuration.
    ///
    /// The registry's active provider is captured here and subscriptions are
    /// set up immediately.
    pub fn new(
        registry: &ProviderRegistry,
        settings: Arc<dyn SettingsReader>,
        bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_config(registry, settings, bus, clock, CoordinatorConfig::default())
    }

    /// Creates a coordinator with custom configuration.
    pub fn with_config(
        registry: &ProviderRegistry,
        settings: Arc<dyn SettingsReader>,
        bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        config: CoordinatorConfig,
    ) -> Self {
        let provider = registry.active();
        let (tx, inbox) = mpsc::unbounded_channel();
        let relay = EventRelay::attach(provider.clone(), Arc::clone(&bus), tx);

        info!(
            provider = ?provider.as_ref().map(|p| p.id()),
            callback_timeout_ms = config.callback_timeout.map(|t| t.num_milliseconds()),
            "Ad session coordinator started"
        );

        Self {
            settings,
            bus,
            clock,
            provider,
            gesture: DebugGesture::new(config.gesture),
            config,
            state: SessionState::new(),
            relay,
            inbox,
        }
    }

    // === Caching ===

    /// Pre-fetches the interstitial units for `primary` and `others`, once per
    /// process.
    ///
    /// The latch covers the whole batch. Each distinct tag is requested once;
    /// duplicates in the input are skipped.
    pub fn cache_interstitials(&mut self, primary: &AdTag, others: &[AdTag]) {
        if self.state.interstitials_cached() {
            return;
        }
        let Some(provider) = self.enabled_provider() else {
            return;
        };

        let tags = distinct_tags(primary, others);
        debug!(count = tags.len(), "Caching interstitial batch");
        for tag in tags {
            provider.cache_interstitial(tag);
        }
        self.state.latch_interstitials_cached();
    }

    /// Pre-fetches the rewarded video units, once per process. Same batching
    /// rules as [`cache_interstitials`](Self::cache_interstitials).
    pub fn cache_rewarded_videos(&mut self, primary: &AdTag, others: &[AdTag]) {
        if self.state.rewarded_cached() {
            return;
        }
        let Some(provider) = self.enabled_provider() else {
            return;
        };

        let tags = distinct_tags(primary, others);
        debug!(count = tags.len(), "Caching rewarded video batch");
        for tag in tags {
            provider.cache_rewarded_video(tag);
        }
        self.state.latch_rewarded_cached();
    }

    /// Pre-fetches a single interstitial unit; not latched.
    pub fn cache_interstitial(&self, tag: &AdTag) {
        if let Some(provider) = self.enabled_provider() {
            provider.cache_interstitial(tag);
        }
    }

    /// Pre-fetches a single rewarded video unit; not latched.
    pub fn cache_rewarded_video(&self, tag: &AdTag) {
        if let Some(provider) = self.enabled_provider() {
            provider.cache_rewarded_video(tag);
        }
    }

    // === Banner ===

    pub fn show_banner(&self, tag: &AdTag) {
        if let Some(provider) = self.enabled_provider() {
            provider.show_banner(tag);
        }
    }

    /// Removes the banner. Works even when ads are disabled.
    pub fn hide_banner(&self) {
        if let Some(provider) = &self.provider {
            provider.hide_banner();
        }
    }

    pub fn banner_height(&self) -> f32 {
        self.enabled_provider()
            .map(|p| p.banner_height())
            .unwrap_or(0.0)
    }

    pub fn is_banner_visible(&self) -> bool {
        self.enabled_provider()
            .map(|p| p.is_banner_visible())
            .unwrap_or(false)
    }

    // === Display ===

    /// Shows an interstitial immediately, bypassing the admission gate. No
    /// continuation is tracked.
    pub fn show_interstitial(&self, tag: &AdTag) {
        if let Some(provider) = self.enabled_provider() {
            info!(%tag, "Displaying interstitial");
            broadcast(self.bus.as_ref(), BusEvent::SuspendMusicForAd);
            provider.show_interstitial(tag);
        }
    }

    /// Shows a rewarded video immediately. Gated on the enable flag like every
    /// other display path.
    pub fn show_rewarded_video(&self, tag: &AdTag) {
        if let Some(provider) = self.enabled_provider() {
            info!(%tag, "Displaying rewarded video");
            broadcast(self.bus.as_ref(), BusEvent::SuspendMusicForAd);
            provider.show_rewarded_video(tag);
        }
    }

    /// Admission-gated interstitial between levels.
    ///
    /// `callback` runs exactly once: right away when no ad is shown, or when
    /// the provider reports the ad closed (or the configured timeout passes).
    /// While a previous between-level ad is still on screen, new requests do
    /// not count as attempts and complete immediately.
    pub fn show_between_level_ad(&mut self, tag: &AdTag, callback: Option<AdCallback>) {
        let Some(provider) = self.enabled_provider() else {
            run_callback(callback);
            return;
        };

        if self.state.interstitial_on_screen() {
            debug!(%tag, "Between-level ad already in progress, skipping");
            run_callback(callback);
            return;
        }

        // The gate sees the attempts skipped since the last display, so a
        // threshold of T skips T requests before the next ad. With T = 1 this
        // shows on every other call, not on every call as an
        // increment-then-check order would.
        let admission = AdmissionSettings {
            ads_enabled: self.settings.ads_enabled(),
            interstitial_delay_threshold: self.settings.interstitial_delay_threshold(),
        };
        let admitted = can_show_between_level_ad(&self.state, &admission);
        self.state.increment_interstitial_counter();

        if !admitted {
            debug!(
                %tag,
                counter = self.state.interstitial_counter(),
                threshold = admission.interstitial_delay_threshold,
                "Between-level ad not admitted"
            );
            run_callback(callback);
            return;
        }

        info!(%tag, "Displaying between-level interstitial");
        self.state.reset_interstitial_counter();
        let deadline = self
            .config
            .callback_timeout
            .map(|timeout| self.clock.now().plus(timeout));
        self.state.begin_interstitial(callback, deadline);
        broadcast(self.bus.as_ref(), BusEvent::SuspendMusicForAd);
        provider.show_interstitial(tag);
    }

    // === Debug ===

    /// Opens the provider's test UI.
    ///
    /// With `use_click_counter`, each call is one tap of the hidden gesture and
    /// the UI only opens once enough quick taps have accumulated. Not gated on
    /// the enable flag.
    pub fn show_test_ui(&mut self, use_click_counter: bool) {
        if use_click_counter {
            if self.gesture.register_tap(self.clock.now()) {
                debug!("Debug gesture completed");
                self.show_test_ui(false);
            }
            return;
        }

        if let Some(provider) = &self.provider {
            info!(provider = %provider.id(), "Opening provider test UI");
            provider.show_test_ui();
        }
    }

    // === Event loop ===

    /// Applies every queued provider event and bus signal, then checks the
    /// continuation deadline. Never blocks. Returns the number of messages
    /// applied.
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.inbox.try_recv() {
            self.apply(message);
            applied += 1;
        }
        self.expire_pending_callback();
        applied
    }

    /// Drives the inbox until `shutdown` flips to `true` (or its sender is
    /// dropped), then detaches.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.poll_interval);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }

                message = self.inbox.recv() => match message {
                    Some(message) => self.apply(message),
                    None => break,
                },

                _ = interval.tick() => {
                    self.expire_pending_callback();
                }
            }
        }

        self.pump_events();
        self.shutdown();
    }

    /// Unsubscribes from the provider and the bus. Idempotent.
    pub fn shutdown(&mut self) {
        if self.relay.is_attached() {
            self.relay.detach();
            info!("Ad session coordinator stopped");
        }
    }

    // === Queries ===

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn has_active_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.relay.is_attached()
    }

    pub fn notifications(&self) -> &Notifications {
        self.relay.notifications()
    }

    /// Public notification channels.
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        self.relay.notifications_mut()
    }

    // === Internals ===

    fn enabled_provider(&self) -> Option<Arc<dyn AdProvider>> {
        if !self.settings.ads_enabled() {
            return None;
        }
        self.provider.clone()
    }

    fn apply(&mut self, message: InboxMessage) {
        match self.relay.dispatch(message, &mut self.state) {
            RelayFollowUp::None => {}
            RelayFollowUp::HideBanner => {
                info!("Ads disabled, removing banner");
                self.hide_banner();
            }
            RelayFollowUp::ShowInterstitial(tag) => self.show_interstitial(&tag),
        }
    }

    fn expire_pending_callback(&mut self) {
        let now = self.clock.now();
        if let Some(shown) = self.state.take_expired_interstitial(&now) {
            warn!("Interstitial close event never arrived, releasing continuation");
            broadcast(self.bus.as_ref(), BusEvent::ResumeMusicAfterAd);
            run_callback(shown.into_callback());
        }
    }
}

impl std::fmt::Debug for AdSessionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdSessionCoordinator")
            .field("provider", &self.provider.as_ref().map(|p| p.id()))
            .field("state", &self.state)
            .field("attached", &self.relay.is_attached())
            .finish()
    }
}

fn run_callback(callback: Option<AdCallback>) {
    if let Some(callback) = callback {
        callback();
    }
}

fn distinct_tags<'a>(primary: &'a AdTag, others: &'a [AdTag]) -> Vec<&'a AdTag> {
    let mut tags: Vec<&AdTag> = Vec::with_capacity(others.len() + 1);
    for tag in std::iter::once(primary).chain(others) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
