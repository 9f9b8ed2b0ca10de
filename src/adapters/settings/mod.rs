//! Settings adapters.

mod runtime_settings;

pub use runtime_settings::RuntimeSettings;
