//! Ad network adapters.
//!
//! - `SimulatedProvider` - In-process network that records calls and can
//!   auto-complete ads

mod simulated;

pub use simulated::{ProviderCall, SimulatedProvider, SIMULATED_PROVIDER_ID};
