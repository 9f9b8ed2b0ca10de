//! EventSubscriber port - Interface for subscribing to bus events.
//!
//! This port defines how handlers register interest in bus events without
//! knowing about the underlying transport mechanism.

use std::sync::Arc;

use crate::domain::ads::BusEvent;
use crate::domain::foundation::{DomainError, SubscriptionId};

/// Handler for processing bus events.
///
/// Implementations should be:
/// - **Quick** - handlers run on the publisher's thread
/// - **Isolated** - errors don't affect other handlers
///
/// # Example
///
/// ```ignore
/// struct MusicDucker { /* ... */ }
///
/// impl EventHandler for MusicDucker {
///     fn handle(&self, event: &BusEvent) -> Result<(), DomainError> {
///         if let BusEvent::SuspendMusicForAd = event { /* mute */ }
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "MusicDucker"
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Process an event.
    fn handle(&self, event: &BusEvent) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to bus events.
///
/// Handlers register interest in specific event types and are invoked
/// when matching events are published. Every registration yields a
/// [`SubscriptionId`] that removes it again.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) -> SubscriptionId;

    /// Subscribe handler to multiple event types under one subscription.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>)
        -> SubscriptionId;

    /// Remove every registration made under `id`. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Combined trait for event bus implementations.
///
/// An EventBus provides both publishing and subscribing capabilities.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

// Blanket implementation - any type that implements both traits is an EventBus
impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that traits are object-safe
    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}

    #[allow(dead_code)]
    fn assert_bus_object_safe(_: &dyn EventBus) {}
}
