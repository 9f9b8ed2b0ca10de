//! In-memory event bus implementation.
//!
//! Provides synchronous, deterministic, in-process event delivery. This is
//! the bus the demo binary and the tests wire in; a host with its own
//! messaging layer implements the ports directly instead.
//!
//! # Panics
//!
//! Uses `.expect()` on lock operations, which panics if a lock is poisoned.
//! Handlers run after locks are released, so only a panic inside this
//! adapter itself can poison them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::ads::BusEvent;
use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

type Registration = (SubscriptionId, Arc<dyn EventHandler>);

/// In-memory event bus.
///
/// Features:
/// - Synchronous delivery on the publisher's thread
/// - Event capture for assertions
/// - Handler registration, invocation and removal
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
///
/// bus.publish(BusEvent::SuspendMusicForAd)?;
///
/// assert_eq!(bus.event_count(), 1);
/// assert!(bus.has_event(BusEvent::SUSPEND_MUSIC));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Registration>>>,
    published: RwLock<Vec<BusEvent>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<BusEvent> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<BusEvent> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Clears all published events.
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .clear();
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .iter()
            .any(|e| e.event_type() == event_type)
    }

    /// Returns the number of live registrations across all event types.
    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .expect("InMemoryEventBus: handlers lock poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: BusEvent) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .push(event.clone());

        // Clone handlers so none run while the lock is held
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .handlers
                .read()
                .expect("InMemoryEventBus: handlers lock poisoned");
            handlers
                .get(event.event_type())
                .map(|regs| regs.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(&event) {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EventDeliveryFailed,
                format!("Handler errors: {}", errors.join(", ")),
            )
            .with_detail("event_type", event.event_type()));
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        self.subscribe_all(&[event_type], handler)
    }

    fn subscribe_all(
        &self,
        event_types: &[&str],
        handler: Arc<dyn EventHandler>,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers write lock poisoned");
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push((id, Arc::clone(&handler)));
        }
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers write lock poisoned");
        for regs in handlers.values_mut() {
            regs.retain(|(reg_id, _)| *reg_id != id);
        }
        handlers.retain(|_, regs| !regs.is_empty());
    }
}
