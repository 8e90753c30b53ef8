//! Alert monitor.
//!
//! Runs every cycle after the thermostat.  Each probe is compared against
//! its fixed threshold; every cycle the condition holds, the alert is
//! raised again.  There is no latch, debounce or cooldown: a flooded
//! basement keeps texting until the water is gone.

use core::fmt;

use log::error;

use crate::config::SystemConfig;
use crate::context::SensorSnapshot;

/// Conditions that text the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    WaterDetected,
    SmokeDetected,
}

impl Alert {
    /// Outbound text.
    pub const fn message(self) -> &'static str {
        match self {
            Self::WaterDetected => "Water detected",
            Self::SmokeDetected => "Smoke detected",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub struct AlertMonitor {
    water_max: u16,
    smoke_max: u16,
}

impl AlertMonitor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            water_max: config.water_max,
            smoke_max: config.smoke_max,
        }
    }

    /// Alerts active for this snapshot, water first.
    pub fn evaluate(&self, snap: &SensorSnapshot) -> heapless::Vec<Alert, 2> {
        let mut raised = heapless::Vec::new();

        if snap.water_level > self.water_max {
            error!("ALERT: water level {} > {}", snap.water_level, self.water_max);
            let _ = raised.push(Alert::WaterDetected);
        }
        if let Some(smoke) = snap.smoke_level {
            if smoke > self.smoke_max {
                error!("ALERT: smoke level {} > {}", smoke, self.smoke_max);
                let _ = raised.push(Alert::SmokeDetected);
            }
        }

        raised
    }
}
