//! Clock port - Source of "now" for debouncing and timeouts.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
