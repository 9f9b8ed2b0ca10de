//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Provider Port
//!
//! - `AdProvider` - Capability contract for an ad network
//! - `ProviderEventSink` - Channel endpoint providers emit lifecycle events into
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for broadcasting bus events
//! - `EventSubscriber` - Port for subscribing to bus events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Collaborator Ports
//!
//! - `SettingsReader` - Ads toggle and interstitial delay threshold
//! - `Clock` - Current time for debouncing and timeouts
//! - `MusicOutput` / `MusicPreference` - Background music control

mod ad_provider;
mod clock;
mod event_publisher;
mod event_subscriber;
mod music_output;
mod settings_reader;

pub use ad_provider::{AdProvider, InboxMessage, ProviderEventSink};
pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use music_output::{MusicOutput, MusicPreference};
pub use settings_reader::SettingsReader;
