//! EventRelay - Bridges provider lifecycle events and bus signals into the
//! coordinator.
//!
//! At start the relay subscribes to the active provider and to the bus
//! signals the coordinator reacts to; `detach` removes exactly those
//! registrations. Everything arrives through one inbox and is applied on the
//! coordinator's thread:
//!
//! | Message | Effect |
//! |---------|--------|
//! | `InterstitialClosed` | resume music, notify, run the pending continuation |
//! | `GrantReward` | resume music, notify |
//! | `BannerDisplayed` / `BannerRemoved` | notify |
//! | `AdsDisabled` (bus) | coordinator hides the banner |
//! | `DisplayAdPlacement` (bus) | coordinator shows the interstitial |

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::Notifications;
use crate::domain::ads::{BusEvent, ProviderEvent, SessionState};
use crate::domain::foundation::{AdTag, DomainError, ErrorCode, SubscriptionId};
use crate::ports::{AdProvider, EventBus, EventHandler, InboxMessage, ProviderEventSink};

/// Work the coordinator still has to do after a message was relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFollowUp {
    None,
    HideBanner,
    ShowInterstitial(AdTag),
}

/// Owns subscription lifetime and the public notification channels.
pub struct EventRelay {
    bus: Arc<dyn EventBus>,
    provider: Option<Arc<dyn AdProvider>>,
    provider_subscription: Option<SubscriptionId>,
    bus_subscription: Option<SubscriptionId>,
    notifications: Notifications,
}

impl EventRelay {
    /// Subscribes to `provider` (if any) and to the inbound bus signals, all
    /// feeding `inbox`.
    pub fn attach(
        provider: Option<Arc<dyn AdProvider>>,
        bus: Arc<dyn EventBus>,
        inbox: UnboundedSender<InboxMessage>,
    ) -> Self {
        let provider_subscription = provider
            .as_ref()
            .map(|p| p.subscribe(ProviderEventSink::new(inbox.clone())));

        let bus_subscription = bus.subscribe_all(
            &[BusEvent::ADS_DISABLED, BusEvent::DISPLAY_PLACEMENT],
            Arc::new(InboxForwarder { inbox }),
        );

        debug!(
            provider = ?provider.as_ref().map(|p| p.id()),
            "Event relay attached"
        );

        Self {
            bus,
            provider,
            provider_subscription,
            bus_subscription: Some(bus_subscription),
            notifications: Notifications::new(),
        }
    }

    /// Removes the registrations made by [`attach`](Self::attach). Idempotent.
    pub fn detach(&mut self) {
        if let (Some(provider), Some(id)) = (&self.provider, self.provider_subscription.take()) {
            provider.unsubscribe(id);
        }
        if let Some(id) = self.bus_subscription.take() {
            self.bus.unsubscribe(id);
            debug!("Event relay detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.bus_subscription.is_some()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Applies one inbox message to `state` and the public channels.
    pub fn dispatch(&mut self, message: InboxMessage, state: &mut SessionState) -> RelayFollowUp {
        match message {
            InboxMessage::Provider(event) => {
                self.on_provider_event(event, state);
                RelayFollowUp::None
            }
            InboxMessage::Bus(BusEvent::AdsDisabled) => RelayFollowUp::HideBanner,
            InboxMessage::Bus(BusEvent::DisplayAdPlacement { tag }) => {
                RelayFollowUp::ShowInterstitial(tag)
            }
            InboxMessage::Bus(other) => {
                debug!(event_type = other.event_type(), "Ignoring bus event");
                RelayFollowUp::None
            }
        }
    }

    fn on_provider_event(&mut self, event: ProviderEvent, state: &mut SessionState) {
        debug!(%event, "Relaying provider event");
        match event {
            ProviderEvent::InterstitialClosed => {
                broadcast(self.bus.as_ref(), BusEvent::ResumeMusicAfterAd);
                self.notifications.notify(event);
                // Slot is emptied before the continuation runs.
                if let Some(callback) = state.finish_interstitial() {
                    callback();
                }
            }
            ProviderEvent::GrantReward => {
                broadcast(self.bus.as_ref(), BusEvent::ResumeMusicAfterAd);
                self.notifications.notify(event);
            }
            ProviderEvent::BannerDisplayed | ProviderEvent::BannerRemoved => {
                self.notifications.notify(event);
            }
        }
    }
}

impl Drop for EventRelay {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Publishes on the bus, logging instead of failing.
pub(crate) fn broadcast(bus: &dyn EventBus, event: BusEvent) {
    let event_type = event.event_type();
    if let Err(e) = bus.publish(event) {
        warn!(event_type, error = %e, "Bus delivery failed");
    }
}

/// Bus handler that queues inbound signals for the coordinator.
struct InboxForwarder {
    inbox: UnboundedSender<InboxMessage>,
}

impl EventHandler for InboxForwarder {
    fn handle(&self, event: &BusEvent) -> Result<(), DomainError> {
        self.inbox
            .send(InboxMessage::Bus(event.clone()))
            .map_err(|_| {
                DomainError::new(ErrorCode::EventDeliveryFailed, "Ads coordinator inbox closed")
            })
    }

    fn name(&self) -> &'static str {
        "AdsInboxForwarder"
    }
}
