//! Two-threshold heating controller.
//!
//! Level-driven and recomputed on every *eligible* cycle:
//!
//! | inside temperature      | heating             |
//! |-------------------------|---------------------|
//! | above `max_inside`      | off                 |
//! | below `min_inside`      | on                  |
//! | within the band         | unchanged (held)    |
//!
//! A decision is only taken once `now >= next_eligible`; each evaluation
//! pushes `next_eligible` forward by the configured interval, whether or
//! not the relay changed.

use crate::context::ThermostatConfig;

/// Result of one eligible evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatingDecision {
    /// Drive the heating relay to this level.
    Drive(bool),
    /// Inside the band, relay left as it is.
    Hold,
}

pub struct Thermostat {
    interval_ms: u64,
    next_eligible_ms: u64,
    /// Last level driven; `None` until the first edge is hit.
    heating: Option<bool>,
}

impl Thermostat {
    /// The first call to [`evaluate`](Self::evaluate) is always eligible.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_eligible_ms: 0,
            heating: None,
        }
    }

    /// Evaluate at `now_ms`.  Returns `None` when not yet eligible.
    pub fn evaluate(
        &mut self,
        now_ms: u64,
        inside_c: f32,
        band: &ThermostatConfig,
    ) -> Option<HeatingDecision> {
        if now_ms < self.next_eligible_ms {
            return None;
        }
        self.next_eligible_ms = now_ms.saturating_add(self.interval_ms);

        let decision = if inside_c > band.max_inside {
            HeatingDecision::Drive(false)
        } else if inside_c < band.min_inside {
            HeatingDecision::Drive(true)
        } else {
            HeatingDecision::Hold
        };

        if let HeatingDecision::Drive(on) = decision {
            self.heating = Some(on);
        }
        Some(decision)
    }

    /// Last level driven, if any.
    pub fn heating(&self) -> Option<bool> {
        self.heating
    }

    pub fn next_eligible_ms(&self) -> u64 {
        self.next_eligible_ms
    }
}
