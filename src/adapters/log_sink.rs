//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one tagged line per application
//! event to the logger (UART / USB-CDC on the board).  Tags are fixed so
//! the console can be grepped: `START`, `FRAME`, `CMD`, `HEAT`, `ALERT`,
//! `LINK`.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | cycling"),
            AppEvent::MessageReceived(len) => info!("FRAME | message, {} bytes", len),
            AppEvent::FramingOverflow => warn!("FRAME | overflow, message truncated"),
            AppEvent::CommandHandled(kind) => info!("CMD   | {:?}", kind),
            AppEvent::HeatingChanged(on) => {
                info!("HEAT  | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::AlertRaised(alert) => error!("ALERT | {}", alert),
            AppEvent::TransportFault(e) => warn!("LINK  | {}", e),
        }
    }
}
