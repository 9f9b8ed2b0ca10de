//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `ads` - Session state, admission gate and debug gesture

pub mod ads;
pub mod foundation;
