//! SMS home controller library.
//!
//! Exposes the pure-logic modules for integration testing and fuzzing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; on the host the drivers fall back to simulation
//! stubs.

#![deny(unused_must_use)]

pub mod alerts;
pub mod app;
pub mod config;
pub mod context;
pub mod control;
pub mod error;
pub mod sms;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
