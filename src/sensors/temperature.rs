//! DHT11 temperature sensor.
//!
//! The single-wire bit clocking lives in [`hw_init::dht11_read`]; this
//! driver validates the 5-byte frame and converts it to degrees Celsius.
//!
//! Frame layout: `[rh_int, rh_dec, t_int, t_dec, checksum]`.  The
//! checksum is the low byte of the sum of the first four.  Bit 7 of
//! `t_dec` marks a negative temperature.

use crate::drivers::hw_init::{self, DhtFrame};
use crate::error::SensorError;

pub struct Dht11 {
    pin: i32,
}

impl Dht11 {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }

    pub fn read(&mut self) -> Result<f32, SensorError> {
        decode_frame(hw_init::dht11_read(self.pin)?)
    }
}

/// Check the checksum and extract the temperature.
pub fn decode_frame(frame: DhtFrame) -> Result<f32, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) / 10.0;
    Ok(if frame[3] & 0x80 != 0 { -magnitude } else { magnitude })
}
