//! Shared mutable context threaded through every cycle stage.
//!
//! `HomeContext` is the one record the dispatcher, thermostat and alert
//! monitor read from and write to: switchable device states, the heating
//! band, and the latest sensor snapshot.  It lives for the whole process
//! and is handed out by `&mut`; there are no globals.

use log::warn;

use crate::app::ports::{AnalogChannel, SensorPort, TemperatureChannel};
use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// Devices that can be switched by an inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    LightOutside,
    LightInside,
    Tv,
    Gate,
}

impl Device {
    /// Every switchable device, in report order.
    pub const ALL: [Device; 4] = [
        Device::LightOutside,
        Device::LightInside,
        Device::Tv,
        Device::Gate,
    ];

    /// Label used in the status report.
    pub const fn label(self) -> &'static str {
        match self {
            Self::LightOutside => "Light outside",
            Self::LightInside => "Light inside",
            Self::Tv => "TV",
            Self::Gate => "Gate",
        }
    }
}

/// Last commanded on/off state of each switchable device.
///
/// Mirrors what was written to the relays; never read back from hardware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceState {
    pub light_outside: bool,
    pub light_inside: bool,
    pub tv: bool,
    pub gate: bool,
}

impl DeviceState {
    pub fn get(&self, device: Device) -> bool {
        match device {
            Device::LightOutside => self.light_outside,
            Device::LightInside => self.light_inside,
            Device::Tv => self.tv,
            Device::Gate => self.gate,
        }
    }

    pub fn set(&mut self, device: Device, on: bool) {
        let slot = match device {
            Device::LightOutside => &mut self.light_outside,
            Device::LightInside => &mut self.light_inside,
            Device::Tv => &mut self.tv,
            Device::Gate => &mut self.gate,
        };
        *slot = on;
    }
}

// ---------------------------------------------------------------------------
// Heating band
// ---------------------------------------------------------------------------

/// Inside-temperature band used by the thermostat.
///
/// `min_inside <= max_inside` is only enforced under
/// [`ThresholdRangePolicy::Validated`](crate::config::ThresholdRangePolicy).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermostatConfig {
    pub min_inside: f32,
    pub max_inside: f32,
}

impl ThermostatConfig {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            min_inside: config.min_inside_c,
            max_inside: config.max_inside_c,
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// Latest reading of every sensor.  Overwritten each cycle, no history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Inside temperature (°C); stale if the last read failed.
    pub temperature_inside: f32,
    /// Outside temperature (°C); stale if the last read failed.
    pub temperature_outside: f32,
    /// Raw water-level ADC reading.
    pub water_level: u16,
    /// Raw smoke ADC reading, `None` when no smoke sensor is fitted.
    pub smoke_level: Option<u16>,
}

impl SensorSnapshot {
    /// Sample every sensor.
    ///
    /// A failed temperature read keeps the previous value; the failure is
    /// logged and otherwise swallowed so one flaky probe cannot stall the
    /// cycle.
    pub fn refresh(&mut self, sensors: &mut impl SensorPort, smoke_enabled: bool) {
        match sensors.read_temperature(TemperatureChannel::Inside) {
            Ok(t) => self.temperature_inside = t,
            Err(e) => warn!("inside temperature read failed ({e}), keeping {:.1}", self.temperature_inside),
        }
        match sensors.read_temperature(TemperatureChannel::Outside) {
            Ok(t) => self.temperature_outside = t,
            Err(e) => warn!("outside temperature read failed ({e}), keeping {:.1}", self.temperature_outside),
        }

        self.water_level = sensors.read_analog(AnalogChannel::WaterLevel);
        self.smoke_level = smoke_enabled.then(|| sensors.read_analog(AnalogChannel::Smoke));
    }
}

// ---------------------------------------------------------------------------
// HomeContext
// ---------------------------------------------------------------------------

/// The shared context passed to every cycle stage.
#[derive(Debug, Clone)]
pub struct HomeContext {
    pub devices: DeviceState,
    pub thermostat: ThermostatConfig,
    pub sensors: SensorSnapshot,
}

impl HomeContext {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            devices: DeviceState::default(),
            thermostat: ThermostatConfig::from_config(config),
            sensors: SensorSnapshot::default(),
        }
    }
}
