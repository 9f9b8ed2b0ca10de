//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event bus implementations
//! - `providers` - Ad network implementations
//! - `settings` - Settings store implementations
//! - `clock` - Time sources
//! - `audio` - Music mixer implementations

pub mod audio;
pub mod clock;
pub mod events;
pub mod providers;
pub mod settings;

pub use audio::InMemoryMusicOutput;
pub use clock::{ManualClock, SystemClock};
pub use events::InMemoryEventBus;
pub use providers::{ProviderCall, SimulatedProvider, SIMULATED_PROVIDER_ID};
pub use settings::RuntimeSettings;
