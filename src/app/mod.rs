//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the command vocabulary, the dispatcher and the
//! per-cycle orchestration.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without a modem or relays.

pub mod commands;
pub mod dispatch;
pub mod events;
pub mod ports;
pub mod service;
