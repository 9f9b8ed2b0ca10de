//! EventPublisher port - Interface for broadcasting cross-cutting signals.
//!
//! This port defines how the ads core broadcasts signals (music suspend and
//! resume) without knowing which modules listen or how delivery works.

use crate::domain::ads::BusEvent;
use crate::domain::foundation::DomainError;

/// Port for publishing bus events.
///
/// Implementations must ensure:
/// - Every handler subscribed to the event type is invoked
/// - A failing handler does not prevent delivery to the others
/// - Handler errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// bus.publish(BusEvent::SuspendMusicForAd)?;
/// ```
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    fn publish(&self, event: BusEvent) -> Result<(), DomainError>;
}
