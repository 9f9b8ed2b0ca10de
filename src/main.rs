//! Demo session: wires the simulated network, the in-memory bus and the
//! music ducking handler, then plays through a short scripted session.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use ad_mediation::adapters::{
    InMemoryEventBus, InMemoryMusicOutput, SimulatedProvider, SystemClock,
};
use ad_mediation::application::{AdSessionCoordinator, AudioDuckingHandler, ProviderRegistry};
use ad_mediation::config::AppConfig;
use ad_mediation::domain::ads::ProviderEvent;
use ad_mediation::domain::foundation::AdTag;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = config.logging.env_filter()?;
    if config.logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let bus = Arc::new(InMemoryEventBus::new());
    let music = Arc::new(InMemoryMusicOutput::new());
    let ducking = Arc::new(AudioDuckingHandler::new(music.clone(), music.clone()));
    AudioDuckingHandler::register(ducking, bus.as_ref());

    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(
        SimulatedProvider::new().with_auto_close(config.provider.simulated_auto_close),
    ));
    registry.select(&config.provider.provider_id()?);

    let mut coordinator = AdSessionCoordinator::with_config(
        &registry,
        Arc::new(config.runtime_settings()?),
        bus.clone(),
        Arc::new(SystemClock),
        config.coordinator_config()?,
    );

    let rewards = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&rewards);
    coordinator
        .notifications_mut()
        .subscribe(ProviderEvent::GrantReward, move || counter.set(counter.get() + 1));

    let level_end = AdTag::from("level_end");
    let bonus = AdTag::from("bonus_coins");
    coordinator.cache_interstitials(&level_end, &[AdTag::from("game_over")]);
    coordinator.cache_rewarded_videos(&bonus, &[]);

    coordinator.show_banner(&AdTag::from("main_menu"));
    coordinator.pump_events();
    info!(
        visible = coordinator.is_banner_visible(),
        height = coordinator.banner_height(),
        "Banner state"
    );

    for level in 1..=3u32 {
        let resumed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&resumed);
        coordinator.show_between_level_ad(&level_end, Some(Box::new(move || flag.set(true))));
        coordinator.pump_events();
        info!(
            level,
            resumed = resumed.get(),
            muted = music.mute_calls(),
            "Level finished"
        );
    }

    coordinator.show_rewarded_video(&bonus);
    coordinator.pump_events();
    info!(rewards = rewards.get(), "Rewarded video finished");

    coordinator.hide_banner();

    let (stop, stopped) = watch::channel(false);
    stop.send(true)?;
    coordinator.run(stopped).await;

    info!(
        published = bus.event_count(),
        mutes = music.mute_calls(),
        unmutes = music.unmute_calls(),
        "Demo session complete"
    );
    Ok(())
}
