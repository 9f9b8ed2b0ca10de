//! Ad Mediation - Admission and session control for in-game advertising
//!
//! This crate decides when interstitials may be shown between levels, drives
//! the active ad network, ducks background music around full-screen ads and
//! hands control back to the game exactly once when an ad finishes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
