//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (modem, sensors, relays, clock, event sinks) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes
//! them via generics, so the cycle logic never touches hardware directly.

use crate::context::Device;
use crate::error::{SensorError, TransportError};

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: modem ↔ domain)
// ───────────────────────────────────────────────────────────────

/// The text-message link.  On the board this is a GSM modem in text mode.
///
/// Every call is bounded; none of them may block indefinitely.
pub trait TransportPort {
    /// One-time bring-up, issued before the first cycle.
    fn init_text_mode(&mut self) -> Result<(), TransportError>;

    /// Non-blocking poll for one inbound byte.
    fn read_byte(&mut self) -> Result<Option<u8>, TransportError>;

    /// Send an acknowledgement, report or alert.
    fn write_text(&mut self, text: &str) -> Result<(), TransportError>;

    /// Drop every message already delivered to the link's inbox.
    fn purge_inbox(&mut self) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureChannel {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    WaterLevel,
    Smoke,
}

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read one temperature probe (°C).
    fn read_temperature(&mut self, channel: TemperatureChannel) -> Result<f32, SensorError>;

    /// Raw ADC reading of an analog probe.
    fn read_analog(&mut self, channel: AnalogChannel) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command relays.
///
/// Calls are idempotent and assumed to succeed.
pub trait ActuatorPort {
    /// Switch a user-controlled device.
    fn set_device(&mut self, device: Device, on: bool);

    /// Switch the heating actuator.
    fn set_heating(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait ClockPort {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
