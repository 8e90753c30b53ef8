//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the sensor drivers and all relays, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches sensors and relays.  On non-espidf targets the
//! underlying drivers use the hw_init simulation stubs.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::app::ports::{ActuatorPort, AnalogChannel, SensorPort, TemperatureChannel};
use crate::context::Device;
use crate::drivers::relay::{GpioPin, Relay};
use crate::error::SensorError;
use crate::pins;
use crate::sensors::analog::AnalogProbe;
use crate::sensors::temperature::Dht11;

/// Output pins for every relay on the board.
pub struct RelayPins<P: OutputPin> {
    pub light_outside: P,
    pub light_inside: P,
    pub tv: P,
    pub gate: P,
    pub heating: P,
}

impl RelayPins<GpioPin> {
    /// Wiring from [`pins`].
    pub fn board() -> Self {
        Self {
            light_outside: GpioPin(pins::LIGHT_OUTSIDE_GPIO),
            light_inside: GpioPin(pins::LIGHT_INSIDE_GPIO),
            tv: GpioPin(pins::TV_GPIO),
            gate: GpioPin(pins::GATE_GPIO),
            heating: GpioPin(pins::HEATING_GPIO),
        }
    }
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: OutputPin = GpioPin> {
    dht_inside: Dht11,
    dht_outside: Dht11,
    water: AnalogProbe,
    smoke: AnalogProbe,
    light_outside: Relay<P>,
    light_inside: Relay<P>,
    tv: Relay<P>,
    gate: Relay<P>,
    heating: Relay<P>,
}

impl HardwareAdapter<GpioPin> {
    /// The board as wired in [`pins`].  Every relay starts LOW.
    pub fn board() -> Self {
        Self::new(
            Dht11::new(pins::DHT_INSIDE_GPIO),
            Dht11::new(pins::DHT_OUTSIDE_GPIO),
            AnalogProbe::new(pins::ADC1_CH_WATER),
            AnalogProbe::new(pins::ADC1_CH_SMOKE),
            RelayPins::board(),
        )
    }
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(
        dht_inside: Dht11,
        dht_outside: Dht11,
        water: AnalogProbe,
        smoke: AnalogProbe,
        relays: RelayPins<P>,
    ) -> Self {
        Self {
            dht_inside,
            dht_outside,
            water,
            smoke,
            light_outside: Relay::new(relays.light_outside),
            light_inside: Relay::new(relays.light_inside),
            tv: Relay::new(relays.tv),
            gate: Relay::new(relays.gate),
            heating: Relay::new(relays.heating),
        }
    }

    fn relay_mut(&mut self, device: Device) -> &mut Relay<P> {
        match device {
            Device::LightOutside => &mut self.light_outside,
            Device::LightInside => &mut self.light_inside,
            Device::Tv => &mut self.tv,
            Device::Gate => &mut self.gate,
        }
    }

    /// Level last driven on a device relay.
    pub fn is_on(&self, device: Device) -> bool {
        match device {
            Device::LightOutside => self.light_outside.is_on(),
            Device::LightInside => self.light_inside.is_on(),
            Device::Tv => self.tv.is_on(),
            Device::Gate => self.gate.is_on(),
        }
    }

    pub fn is_heating(&self) -> bool {
        self.heating.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin> SensorPort for HardwareAdapter<P> {
    fn read_temperature(&mut self, channel: TemperatureChannel) -> Result<f32, SensorError> {
        match channel {
            TemperatureChannel::Inside => self.dht_inside.read(),
            TemperatureChannel::Outside => self.dht_outside.read(),
        }
    }

    fn read_analog(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::WaterLevel => self.water.read(),
            AnalogChannel::Smoke => self.smoke.read(),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for HardwareAdapter<P> {
    fn set_device(&mut self, device: Device, on: bool) {
        debug!("relay {:?} -> {}", device, on);
        self.relay_mut(device).set(on);
    }

    fn set_heating(&mut self, on: bool) {
        self.heating.set(on);
    }
}
