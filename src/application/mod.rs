//! Application layer - Coordination between the domain and the ports.
//!
//! - `AdSessionCoordinator` - Public entry point for caching and showing ads
//! - `EventRelay` - Subscription lifetime and lifecycle event dispatch
//! - `ProviderRegistry` - Registered networks and the active selection
//! - `Notifications` - Public lifecycle notification channels
//! - `handlers` - Bus handlers (music ducking)

mod coordinator;
mod event_relay;
pub mod handlers;
mod notifications;
mod provider_registry;

pub use coordinator::{AdSessionCoordinator, CoordinatorConfig};
pub use event_relay::{EventRelay, RelayFollowUp};
pub use handlers::AudioDuckingHandler;
pub use notifications::Notifications;
pub use provider_registry::ProviderRegistry;
