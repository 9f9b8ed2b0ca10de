//! Ads module - session bookkeeping and the rules that gate ad display.
//!
//! Everything here is synchronous and free of I/O; the application layer
//! wires it to providers and the event bus.

mod admission;
mod events;
mod gesture;
mod session_state;

pub use admission::{can_show_between_level_ad, AdmissionSettings};
pub use events::{BusEvent, ProviderEvent};
pub use gesture::{DebugGesture, GestureSettings};
pub use session_state::{AdCallback, SessionState, ShownInterstitial};
