//! On/off relay driver.
//!
//! A [`Relay`] wraps any `embedded_hal` [`OutputPin`] and remembers the
//! level it last drove, so callers can query state without reading the
//! pin back.  [`GpioPin`] is the board's pin, backed by the hw_init
//! helpers (ESP-IDF register writes on device, in-memory on the host).

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::drivers::hw_init;

/// Raw GPIO number driven through [`hw_init::gpio_write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioPin(pub i32);

impl ErrorType for GpioPin {
    type Error = Infallible;
}

impl OutputPin for GpioPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.0, true);
        Ok(())
    }
}

pub struct Relay<P: OutputPin> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Takes ownership of `pin` and drives it LOW.
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_low() {
            warn!("relay: initial set_low failed: {:?}", e);
        }
        Self { pin, on: false }
    }

    /// Drive the relay.  A pin error is logged and the remembered level
    /// left unchanged.
    pub fn set(&mut self, on: bool) {
        match self.pin.set_state(on.into()) {
            Ok(()) => self.on = on,
            Err(e) => warn!("relay: set({}) failed: {:?}", on, e),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
