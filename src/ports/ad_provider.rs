//! Ad Provider Port - Capability contract every ad-network adapter satisfies.
//!
//! The coordinator only ever talks to networks through this trait, so a new
//! network is added by implementing it and registering the instance; gating
//! logic is untouched.
//!
//! # Design
//!
//! - Commands are fire-and-forget: showing an ad returns immediately and
//!   completion is observed through a lifecycle event.
//! - Lifecycle events are pushed into a [`ProviderEventSink`]. The sink is a
//!   channel endpoint, so providers may emit from any thread; the coordinator
//!   applies them on its owning thread.
//! - `subscribe`/`unsubscribe` form a symmetric pair keyed by
//!   [`SubscriptionId`].
//!
//! # Example
//!
//! ```ignore
//! struct MyNetwork { sinks: Mutex<HashMap<SubscriptionId, ProviderEventSink>> }
//!
//! impl AdProvider for MyNetwork {
//!     fn show_interstitial(&self, tag: &AdTag) {
//!         sdk::show(tag.as_str());
//!     }
//!     // ... other capabilities
//! }
//! ```

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::ads::{BusEvent, ProviderEvent};
use crate::domain::foundation::{AdTag, ProviderId, SubscriptionId};

/// Port for a pluggable ad network.
pub trait AdProvider: Send + Sync {
    /// Registry key for this provider.
    fn id(&self) -> ProviderId;

    /// Pre-fetch an interstitial unit.
    fn cache_interstitial(&self, tag: &AdTag);

    /// Pre-fetch a rewarded video unit.
    fn cache_rewarded_video(&self, tag: &AdTag);

    fn show_banner(&self, tag: &AdTag);

    fn hide_banner(&self);

    /// Display an interstitial. Emits `InterstitialClosed` once dismissed.
    fn show_interstitial(&self, tag: &AdTag);

    /// Display a rewarded video. Emits `GrantReward` once the reward is earned.
    fn show_rewarded_video(&self, tag: &AdTag);

    /// Height of the banner currently on screen, in points.
    fn banner_height(&self) -> f32;

    fn is_banner_visible(&self) -> bool;

    /// Open the network's test/debug UI.
    fn show_test_ui(&self);

    /// Start delivering lifecycle events into `sink`.
    fn subscribe(&self, sink: ProviderEventSink) -> SubscriptionId;

    /// Stop delivering to the sink registered under `id`. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// A message queued for the coordinator's owning thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxMessage {
    /// Lifecycle event from the active provider.
    Provider(ProviderEvent),
    /// Inbound signal from the event bus.
    Bus(BusEvent),
}

/// Write end of the coordinator inbox handed to providers.
#[derive(Debug, Clone)]
pub struct ProviderEventSink {
    tx: UnboundedSender<InboxMessage>,
}

impl ProviderEventSink {
    pub fn new(tx: UnboundedSender<InboxMessage>) -> Self {
        Self { tx }
    }

    /// Queue a lifecycle event. Returns `false` if the coordinator has gone away.
    pub fn emit(&self, event: ProviderEvent) -> bool {
        if self.tx.send(InboxMessage::Provider(event)).is_err() {
            tracing::trace!(%event, "Provider event dropped, inbox closed");
            return false;
        }
        true
    }
}
