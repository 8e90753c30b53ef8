//! Mock adapters for integration tests.
//!
//! Records every actuator call, every outbound text and every event so
//! tests can assert on full histories without touching real GPIO or a
//! modem.

use std::collections::VecDeque;

use smshome::app::events::AppEvent;
use smshome::app::ports::{
    ActuatorPort, AnalogChannel, ClockPort, EventSink, SensorPort, TemperatureChannel,
    TransportPort,
};
use smshome::app::service::AppService;
use smshome::config::SystemConfig;
use smshome::context::Device;
use smshome::error::{SensorError, TransportError};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetDevice { device: Device, on: bool },
    SetHeating(bool),
}

// ── MockHardware ──────────────────────────────────────────────

/// Scripted sensors plus recording relays.
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub inside: Result<f32, SensorError>,
    pub outside: Result<f32, SensorError>,
    pub water: u16,
    pub smoke: u16,
    pub smoke_reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            inside: Ok(22.0),
            outside: Ok(10.0),
            water: 0,
            smoke: 0,
            smoke_reads: 0,
        }
    }

    pub fn heating_calls(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetHeating(on) => Some(*on),
                ActuatorCall::SetDevice { .. } => None,
            })
            .collect()
    }

    pub fn device_calls(&self) -> Vec<(Device, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetDevice { device, on } => Some((*device, *on)),
                ActuatorCall::SetHeating(_) => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_temperature(&mut self, channel: TemperatureChannel) -> Result<f32, SensorError> {
        match channel {
            TemperatureChannel::Inside => self.inside,
            TemperatureChannel::Outside => self.outside,
        }
    }

    fn read_analog(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::WaterLevel => self.water,
            AnalogChannel::Smoke => {
                self.smoke_reads += 1;
                self.smoke
            }
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_device(&mut self, device: Device, on: bool) {
        self.calls.push(ActuatorCall::SetDevice { device, on });
    }

    fn set_heating(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetHeating(on));
    }
}

// ── MockTransport ─────────────────────────────────────────────

/// Inbound bytes are scripted; outbound texts are recorded.
#[derive(Default)]
pub struct MockTransport {
    pub rx: VecDeque<u8>,
    pub sent: Vec<String>,
    pub inits: usize,
    pub purges: usize,
    pub reads: usize,
    pub fail_init: bool,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_purge: bool,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

impl TransportPort for MockTransport {
    fn init_text_mode(&mut self) -> Result<(), TransportError> {
        self.inits += 1;
        if self.fail_init {
            return Err(TransportError::Serial);
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        self.reads += 1;
        if self.fail_reads {
            return Err(TransportError::Serial);
        }
        Ok(self.rx.pop_front())
    }

    fn write_text(&mut self, text: &str) -> Result<(), TransportError> {
        if self.fail_writes {
            return Err(TransportError::Unavailable);
        }
        self.sent.push(text.to_string());
        Ok(())
    }

    fn purge_inbox(&mut self) -> Result<(), TransportError> {
        self.purges += 1;
        if self.fail_purge {
            return Err(TransportError::Serial);
        }
        Ok(())
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    pub now: u64,
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

pub struct Harness {
    pub app: AppService,
    pub hw: MockHardware,
    pub link: MockTransport,
    pub clock: MockClock,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Harness {
    /// Started service on default configuration.
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        let mut h = Self {
            app: AppService::new(config),
            hw: MockHardware::new(),
            link: MockTransport::new(),
            clock: MockClock::default(),
            sink: RecordingSink::new(),
        };
        h.app
            .start(&mut h.link, &mut h.sink)
            .expect("mock link never fails unless told to");
        h
    }

    pub fn cycle(&mut self) -> smshome::app::service::CycleSummary {
        self.app
            .cycle(&mut self.hw, &mut self.link, &self.clock, &mut self.sink)
    }

    /// Queue `text` as one framed message.
    pub fn receive(&mut self, text: &str) {
        self.link.push(b"#");
        self.link.push(text.as_bytes());
        self.link.push(b"\n");
    }
}
