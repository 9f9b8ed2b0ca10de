//! Public notification channels.
//!
//! Downstream code subscribes here to learn when an interstitial closed, a
//! reward was granted, or a banner appeared or went away. Listeners run on
//! the coordinator's thread while it drains its inbox.

use crate::domain::ads::ProviderEvent;
use crate::domain::foundation::SubscriptionId;

type Listener = Box<dyn FnMut() + 'static>;

/// Listener registry keyed by lifecycle event.
#[derive(Default)]
pub struct Notifications {
    listeners: Vec<(SubscriptionId, ProviderEvent, Listener)>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `kind`.
    pub fn subscribe(
        &mut self,
        kind: ProviderEvent,
        listener: impl FnMut() + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(reg, _, _)| *reg != id);
        self.listeners.len() != before
    }

    /// Invokes every listener registered for `kind`, in registration order.
    pub fn notify(&mut self, kind: ProviderEvent) -> usize {
        let mut delivered = 0;
        for (_, registered, listener) in self.listeners.iter_mut() {
            if *registered == kind {
                listener();
                delivered += 1;
            }
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Notifications {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifications")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
