//! Raw analog probes on ADC1: the water-level strip and the MQ-2 smoke
//! sensor.  Readings are compared against raw thresholds, so no
//! calibration is applied.

use crate::drivers::hw_init;

pub struct AnalogProbe {
    channel: u32,
}

impl AnalogProbe {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// 12-bit raw reading (0 – 4095).
    pub fn read(&mut self) -> u16 {
        hw_init::adc1_read(self.channel)
    }
}
