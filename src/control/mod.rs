//! Closed-loop control.

pub mod thermostat;
