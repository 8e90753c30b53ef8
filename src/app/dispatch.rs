//! Command dispatcher.
//!
//! Applies one matched [`Command`] to the shared [`HomeContext`] and the
//! relays, and decides the reply text.  Exactly one category runs per
//! message; a malformed toggle still counts as handled.

use core::fmt::Write;

use log::{info, warn};

use crate::config::{MissingNumberPolicy, SystemConfig, ThresholdRangePolicy};
use crate::context::{Device, HomeContext};
use crate::error::CommandError;

use super::commands::{Command, Switch, ThresholdBound};
use super::ports::ActuatorPort;

/// Reply when no keyword matched.
pub const UNKNOWN_COMMAND: &str = "Unknown command";
/// Reply when a device keyword came without `ON` / `OFF`.
pub const NOT_RECOGNIZED: &str = "Message is not recognized!";

/// Which branch a message took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    ThresholdSet,
    Toggled(Device),
    /// Device keyword present, switch word missing.
    Malformed(Device),
    Status,
    /// Recognised, but refused by a strict policy.
    Rejected(CommandError),
    Unknown,
}

/// Outcome of one dispatch: the branch taken and the text to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub kind: DispatchKind,
    pub reply: String,
}

impl Dispatch {
    fn new(kind: DispatchKind, reply: impl Into<String>) -> Self {
        Self {
            kind,
            reply: reply.into(),
        }
    }
}

/// Run one command.  `message` is the raw inbound text, echoed back as
/// the acknowledgement of successful threshold and toggle commands.
pub fn dispatch(
    command: Option<Command>,
    message: &str,
    ctx: &mut HomeContext,
    actuators: &mut impl ActuatorPort,
    config: &SystemConfig,
) -> Dispatch {
    match command {
        Some(Command::SetThreshold { bound, value }) => {
            match set_threshold(ctx, bound, value, config) {
                Ok(()) => Dispatch::new(DispatchKind::ThresholdSet, message),
                Err(e) => {
                    warn!("threshold command refused: {e}");
                    Dispatch::new(DispatchKind::Rejected(e), e.reply())
                }
            }
        }
        Some(Command::Toggle {
            device,
            switch: Some(switch),
        }) => {
            actuators.set_device(device, switch.is_on());
            ctx.devices.set(device, switch.is_on());
            info!("{:?} switched {}", device, if switch == Switch::On { "on" } else { "off" });
            Dispatch::new(DispatchKind::Toggled(device), message)
        }
        Some(Command::Toggle { device, switch: None }) => {
            Dispatch::new(DispatchKind::Malformed(device), NOT_RECOGNIZED)
        }
        Some(Command::Status) => Dispatch::new(DispatchKind::Status, status_report(ctx)),
        None => Dispatch::new(DispatchKind::Unknown, UNKNOWN_COMMAND),
    }
}

fn set_threshold(
    ctx: &mut HomeContext,
    bound: ThresholdBound,
    value: Option<f32>,
    config: &SystemConfig,
) -> Result<(), CommandError> {
    let value = match (value, config.missing_number) {
        (Some(v), _) => v,
        (None, MissingNumberPolicy::Zero) => 0.0,
        (None, MissingNumberPolicy::Reject) => return Err(CommandError::MissingNumber),
    };

    let mut band = ctx.thermostat;
    match bound {
        ThresholdBound::Min => band.min_inside = value,
        ThresholdBound::Max => band.max_inside = value,
    }

    if config.threshold_range == ThresholdRangePolicy::Validated
        && band.min_inside > band.max_inside
    {
        return Err(CommandError::BadRange);
    }

    ctx.thermostat = band;
    info!(
        "heating band now {:.1}..{:.1} C",
        band.min_inside, band.max_inside
    );
    Ok(())
}

/// Multi-line report of both temperatures and every device.
pub fn status_report(ctx: &HomeContext) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "Temp outside: {:.1}C", ctx.sensors.temperature_outside);
    let _ = write!(report, "Temp inside: {:.1}C", ctx.sensors.temperature_inside);
    for device in Device::ALL {
        let state = if ctx.devices.get(device) { "ON" } else { "OFF" };
        let _ = write!(report, "\n{}: {}", device.label(), state);
    }
    report
}
