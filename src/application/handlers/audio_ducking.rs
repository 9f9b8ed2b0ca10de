//! AudioDuckingHandler - Silences background music while an ad plays.
//!
//! Listens for the music suspend/resume signals the coordinator broadcasts:
//! - Suspend mutes the playlists unless they are already muted
//! - Resume unmutes them only if the player has music turned on

use std::sync::Arc;

use tracing::debug;

use crate::domain::ads::BusEvent;
use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::ports::{EventHandler, EventSubscriber, MusicOutput, MusicPreference};

/// Bus handler bridging ad signals to the music mixer.
pub struct AudioDuckingHandler {
    output: Arc<dyn MusicOutput>,
    preference: Arc<dyn MusicPreference>,
}

impl AudioDuckingHandler {
    /// Creates a new AudioDuckingHandler.
    pub fn new(output: Arc<dyn MusicOutput>, preference: Arc<dyn MusicPreference>) -> Self {
        Self { output, preference }
    }

    /// Subscribes `handler` to both music signals.
    pub fn register(handler: Arc<Self>, subscriber: &dyn EventSubscriber) -> SubscriptionId {
        subscriber.subscribe_all(&[BusEvent::SUSPEND_MUSIC, BusEvent::RESUME_MUSIC], handler)
    }
}

impl EventHandler for AudioDuckingHandler {
    fn handle(&self, event: &BusEvent) -> Result<(), DomainError> {
        match event {
            BusEvent::SuspendMusicForAd => {
                if !self.output.is_muted() {
                    debug!("Muting music for ad");
                    self.output.mute();
                }
            }
            BusEvent::ResumeMusicAfterAd => {
                if self.preference.music_enabled() {
                    debug!("Restoring music after ad");
                    self.output.unmute();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "AudioDuckingHandler"
    }
}
