//! Integration tests for a full ad session.
//!
//! These tests wire the coordinator to the simulated network, the in-memory
//! bus and the music ducking handler, and verify:
//! 1. Every between-level continuation runs exactly once
//! 2. The delay threshold paces displays
//! 3. Batch caching latches for the rest of the session
//! 4. Shutdown leaves no listener behind
//! 5. Disabling ads silences everything except banner removal

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use proptest::prelude::*;

use ad_mediation::adapters::{
    InMemoryEventBus, InMemoryMusicOutput, ManualClock, ProviderCall, RuntimeSettings,
    SimulatedProvider,
};
use ad_mediation::application::{
    AdSessionCoordinator, AudioDuckingHandler, CoordinatorConfig, ProviderRegistry,
};
use ad_mediation::domain::ads::{AdCallback, BusEvent, ProviderEvent};
use ad_mediation::domain::foundation::AdTag;
use ad_mediation::ports::{AdProvider, EventPublisher, MusicOutput};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Session {
    provider: Arc<SimulatedProvider>,
    bus: Arc<InMemoryEventBus>,
    settings: Arc<RuntimeSettings>,
    clock: Arc<ManualClock>,
    music: Arc<InMemoryMusicOutput>,
    coordinator: AdSessionCoordinator,
}

impl Session {
    fn start(threshold: u32, auto_close: bool) -> Self {
        let provider = Arc::new(SimulatedProvider::new().with_auto_close(auto_close));
        let bus = Arc::new(InMemoryEventBus::new());
        let settings = Arc::new(RuntimeSettings::new(true, threshold));
        let clock = Arc::new(ManualClock::default());
        let music = Arc::new(InMemoryMusicOutput::new());

        let ducking = Arc::new(AudioDuckingHandler::new(music.clone(), music.clone()));
        AudioDuckingHandler::register(ducking, bus.as_ref());

        let mut registry = ProviderRegistry::new();
        registry.register(provider.clone());
        registry.select(&provider.id());

        let coordinator = AdSessionCoordinator::with_config(
            &registry,
            settings.clone(),
            bus.clone(),
            clock.clone(),
            CoordinatorConfig::default(),
        );

        Self {
            provider,
            bus,
            settings,
            clock,
            music,
            coordinator,
        }
    }

    fn calls_matching(&self, pred: impl Fn(&ProviderCall) -> bool) -> usize {
        self.provider.calls().iter().filter(|c| pred(c)).count()
    }
}

fn tag(s: &str) -> AdTag {
    AdTag::from(s)
}

/// A continuation that counts its own invocations.
fn tracked() -> (Rc<Cell<u32>>, AdCallback) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    (hits, Box::new(move || h.set(h.get() + 1)))
}

#[derive(Debug, Clone)]
enum Step {
    Request,
    RequestWithoutCallback,
    Close,
    Pump,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Request),
        1 => Just(Step::RequestWithoutCallback),
        1 => Just(Step::Close),
        1 => Just(Step::Pump),
    ]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn every_continuation_runs_exactly_once(
        threshold in 0u32..4,
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let mut session = Session::start(threshold, false);
        let mut continuations = Vec::new();

        for step in &steps {
            match step {
                Step::Request => {
                    let (hits, callback) = tracked();
                    session.coordinator.show_between_level_ad(&tag("level_end"), Some(callback));
                    continuations.push(hits);
                }
                Step::RequestWithoutCallback => {
                    session.coordinator.show_between_level_ad(&tag("level_end"), None);
                }
                Step::Close => session.provider.emit(ProviderEvent::InterstitialClosed),
                Step::Pump => {
                    session.coordinator.pump_events();
                }
            }
            prop_assert!(continuations.iter().all(|hits| hits.get() <= 1));
        }

        session.provider.emit(ProviderEvent::InterstitialClosed);
        session.coordinator.pump_events();

        prop_assert!(!session.coordinator.state().interstitial_on_screen());
        prop_assert!(continuations.iter().all(|hits| hits.get() == 1));
    }

    #[test]
    fn threshold_paces_between_level_ads(threshold in 0u32..5, attempts in 1u32..30) {
        let mut session = Session::start(threshold, true);

        for attempt in 1..=attempts {
            let before = session.calls_matching(|c| matches!(c, ProviderCall::ShowInterstitial(_)));
            let (hits, callback) = tracked();
            session.coordinator.show_between_level_ad(&tag("level_end"), Some(callback));
            session.coordinator.pump_events();
            let after = session.calls_matching(|c| matches!(c, ProviderCall::ShowInterstitial(_)));

            let expect_shown = attempt % (threshold + 1) == 0;
            prop_assert_eq!(after - before == 1, expect_shown, "attempt {}", attempt);
            prop_assert_eq!(hits.get(), 1);
        }
    }

    #[test]
    fn rewarded_batch_latch_is_irreversible(
        first in prop::collection::vec("[a-d]", 0..5),
        repeats in prop::collection::vec(prop::collection::vec("[a-h]", 0..5), 1..6),
    ) {
        let mut session = Session::start(0, true);
        let others: Vec<AdTag> = first.iter().map(|s| tag(s)).collect();
        session.coordinator.cache_rewarded_videos(&tag("primary"), &others);
        let cached = session.calls_matching(|c| matches!(c, ProviderCall::CacheRewardedVideo(_)));

        for batch in &repeats {
            let others: Vec<AdTag> = batch.iter().map(|s| tag(s)).collect();
            session.coordinator.cache_rewarded_videos(&tag("other_primary"), &others);
        }

        prop_assert!(session.coordinator.state().rewarded_cached());
        prop_assert_eq!(
            session.calls_matching(|c| matches!(c, ProviderCall::CacheRewardedVideo(_))),
            cached
        );
    }
}

// =============================================================================
// Session Scenarios
// =============================================================================

#[test]
fn interstitial_batch_caches_each_tag_once_per_session() {
    let mut session = Session::start(0, true);

    session
        .coordinator
        .cache_interstitials(&tag("level_end"), &[tag("game_over"), tag("level_end")]);
    session
        .coordinator
        .cache_interstitials(&tag("level_end"), &[tag("game_over")]);

    assert_eq!(
        session.provider.calls(),
        vec![
            ProviderCall::CacheInterstitial(tag("level_end")),
            ProviderCall::CacheInterstitial(tag("game_over")),
        ]
    );
}

#[test]
fn music_is_ducked_around_a_shown_interstitial() {
    let mut session = Session::start(0, true);
    let (hits, callback) = tracked();

    session
        .coordinator
        .show_between_level_ad(&tag("level_end"), Some(callback));
    assert!(session.music.is_muted());
    assert_eq!(hits.get(), 0);

    session.coordinator.pump_events();
    assert!(!session.music.is_muted());
    assert_eq!(hits.get(), 1);
    assert_eq!(session.music.mute_calls(), 1);
    assert_eq!(session.music.unmute_calls(), 1);
}

#[test]
fn music_stays_off_after_reward_when_player_disabled_it() {
    let mut session = Session::start(0, true);
    session.music.set_music_enabled(false);
    let rewards = Rc::new(Cell::new(0));
    let r = Rc::clone(&rewards);
    session
        .coordinator
        .notifications_mut()
        .subscribe(ProviderEvent::GrantReward, move || r.set(r.get() + 1));

    session.coordinator.show_rewarded_video(&tag("bonus"));
    session.coordinator.pump_events();

    assert_eq!(rewards.get(), 1);
    assert!(session.music.is_muted());
    assert_eq!(session.music.unmute_calls(), 0);
    assert!(session.bus.has_event(BusEvent::RESUME_MUSIC));
}

#[test]
fn disabled_session_is_silent_but_banner_can_be_removed() {
    let mut session = Session::start(0, true);
    session.coordinator.show_banner(&tag("bottom"));
    session.coordinator.pump_events();
    assert!(session.coordinator.is_banner_visible());
    session.provider.clear_calls();
    session.bus.clear();

    session.settings.set_ads_enabled(false);
    let (hits, callback) = tracked();
    session.coordinator.cache_interstitials(&tag("a"), &[]);
    session.coordinator.cache_rewarded_videos(&tag("b"), &[]);
    session.coordinator.cache_interstitial(&tag("a"));
    session.coordinator.cache_rewarded_video(&tag("b"));
    session.coordinator.show_banner(&tag("top"));
    session.coordinator.show_interstitial(&tag("a"));
    session.coordinator.show_rewarded_video(&tag("b"));
    session
        .coordinator
        .show_between_level_ad(&tag("level_end"), Some(callback));

    assert_eq!(hits.get(), 1);
    assert_eq!(session.provider.call_count(), 0);
    assert_eq!(session.coordinator.banner_height(), 0.0);
    assert!(!session.coordinator.is_banner_visible());
    assert!(!session.coordinator.state().interstitials_cached());
    assert!(!session.coordinator.state().rewarded_cached());
    assert_eq!(session.coordinator.state().interstitial_counter(), 0);
    assert_eq!(session.bus.event_count(), 0);

    session.coordinator.hide_banner();
    assert_eq!(session.provider.calls(), vec![ProviderCall::HideBanner]);
    assert!(!session.provider.is_banner_visible());
}

#[test]
fn ads_disabled_broadcast_retracts_banner() {
    let mut session = Session::start(0, true);
    let removed = Rc::new(Cell::new(0));
    let r = Rc::clone(&removed);
    session
        .coordinator
        .notifications_mut()
        .subscribe(ProviderEvent::BannerRemoved, move || r.set(r.get() + 1));

    session.coordinator.show_banner(&tag("bottom"));
    session.coordinator.pump_events();

    session.settings.set_ads_enabled(false);
    session.bus.publish(BusEvent::AdsDisabled).unwrap();
    session.coordinator.pump_events();

    assert!(!session.provider.is_banner_visible());
    assert_eq!(removed.get(), 1);
}

#[test]
fn debug_gesture_debounces_taps() {
    let mut session = Session::start(0, true);
    let test_ui = |s: &Session| s.calls_matching(|c| *c == ProviderCall::ShowTestUi);

    for _ in 0..5 {
        session.coordinator.show_test_ui(true);
        session.clock.advance_millis(400);
    }
    assert_eq!(test_ui(&session), 1);

    // Slow tap starts a fresh sequence, so four more quick taps are needed.
    session.clock.advance_millis(1_000);
    session.coordinator.show_test_ui(true);
    for _ in 0..3 {
        session.clock.advance_millis(100);
        session.coordinator.show_test_ui(true);
    }
    assert_eq!(test_ui(&session), 1);

    session.clock.advance_millis(100);
    session.coordinator.show_test_ui(true);
    assert_eq!(test_ui(&session), 2);
}

#[test]
fn shutdown_stops_all_notifications() {
    let mut session = Session::start(0, true);
    let delivered = Rc::new(Cell::new(0));
    for kind in ProviderEvent::ALL {
        let d = Rc::clone(&delivered);
        session
            .coordinator
            .notifications_mut()
            .subscribe(kind, move || d.set(d.get() + 1));
    }

    session.coordinator.shutdown();
    for kind in ProviderEvent::ALL {
        session.provider.emit(kind);
    }
    session.bus.publish(BusEvent::AdsDisabled).unwrap();
    session.coordinator.pump_events();

    assert_eq!(delivered.get(), 0);
    assert_eq!(session.provider.subscriber_count(), 0);
    assert!(!session.coordinator.is_attached());
}
