//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the shared context, the framer, the thermostat and
//! the alert monitor.  One call to [`AppService::cycle`] is one pass of the
//! control loop; all I/O flows through port traits injected at the call
//! site, so the whole loop runs against mocks on the host.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │          AppService          │
//! TransportPort ◀─▶│ Framer · Dispatch · Thermo · │
//!                  │ Alerts                       │
//!  ActuatorPort ◀──└──────────────────────────────┘
//! ```
//!
//! Nothing in a cycle is fatal.  Transport failures are logged, reported
//! as [`AppEvent::TransportFault`] and the cycle moves on.

use log::{debug, info, warn};

use crate::alerts::AlertMonitor;
use crate::config::SystemConfig;
use crate::context::{DeviceState, HomeContext, ThermostatConfig};
use crate::control::thermostat::{HeatingDecision, Thermostat};
use crate::error::TransportError;
use crate::sms::framer::{InboundMessage, MessageFramer};

use super::commands::match_command;
use super::dispatch::{dispatch, DispatchKind};
use super::events::AppEvent;
use super::ports::{ActuatorPort, ClockPort, EventSink, SensorPort, TransportPort};

/// Most bytes pulled from the transport in one cycle; the rest wait.
const DRAIN_BUDGET: usize = 512;

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleSummary {
    /// Branch taken by the message dispatched this cycle, if any.
    pub handled: Option<DispatchKind>,
    /// Alerts raised this cycle.
    pub alerts_raised: usize,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    ctx: HomeContext,
    framer: MessageFramer,
    /// At most one message in flight between framer and dispatcher.
    pending: Option<InboundMessage>,
    thermostat: Thermostat,
    alerts: AlertMonitor,
    cycle_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch the transport; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ctx: HomeContext::new(&config),
            framer: MessageFramer::new(),
            pending: None,
            thermostat: Thermostat::new(config.heating_interval_ms),
            alerts: AlertMonitor::new(&config),
            cycle_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring the link up and clear its inbox.
    ///
    /// Both steps are always attempted.  The first failure is returned for
    /// the caller to log; the service is usable either way.
    pub fn start(
        &mut self,
        transport: &mut impl TransportPort,
        sink: &mut impl EventSink,
    ) -> crate::error::Result<()> {
        let mut first_err = None;

        if let Err(e) = transport.init_text_mode() {
            report_fault(e, sink);
            first_err = Some(e);
        }
        if let Err(e) = transport.purge_inbox() {
            report_fault(e, sink);
            first_err = first_err.or(Some(e));
        }

        sink.emit(&AppEvent::Started);
        info!("AppService started");

        match first_err {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle: sample → drain → dispatch → thermostat → alerts.
    ///
    /// `hw` satisfies **both** [`SensorPort`] and [`ActuatorPort`], so one
    /// `&mut` covers sampling and relay writes.
    pub fn cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        transport: &mut impl TransportPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> CycleSummary {
        self.cycle_count += 1;

        // 1. Sensors
        self.ctx
            .sensors
            .refresh(hw, self.config.smoke_sensor_enabled);

        // 2. Framing
        self.drain(transport, sink);

        // 3. Dispatch (at most one message)
        let handled = self
            .pending
            .take()
            .map(|message| self.handle_message(&message, hw, transport, sink));

        // 4. Heating
        self.regulate(clock.now_ms(), hw, sink);

        // 5. Alerts
        let alerts_raised = self.raise_alerts(transport, sink);

        CycleSummary {
            handled,
            alerts_raised,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn context(&self) -> &HomeContext {
        &self.ctx
    }

    pub fn devices(&self) -> &DeviceState {
        &self.ctx.devices
    }

    pub fn thermostat_config(&self) -> &ThermostatConfig {
        &self.ctx.thermostat
    }

    /// Last heating level driven, `None` before the first band edge.
    pub fn heating(&self) -> Option<bool> {
        self.thermostat.heating()
    }

    pub fn framer(&self) -> &MessageFramer {
        &self.framer
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Feed transport bytes to the framer until a message completes, the
    /// transport runs dry, or the budget is spent.
    fn drain(&mut self, transport: &mut impl TransportPort, sink: &mut impl EventSink) {
        let mut budget = DRAIN_BUDGET;

        while self.pending.is_none() && budget > 0 {
            budget -= 1;
            let byte = match transport.read_byte() {
                Ok(Some(b)) => b,
                Ok(None) => break,
                Err(e) => {
                    report_fault(e, sink);
                    break;
                }
            };

            let overflowed_before = self.framer.is_overflowed();
            match self.framer.feed(byte) {
                Some(message) => {
                    debug!("message complete ({} bytes)", message.len());
                    sink.emit(&AppEvent::MessageReceived(message.len()));
                    if let Err(e) = transport.purge_inbox() {
                        report_fault(e, sink);
                    }
                    self.pending = Some(message);
                }
                None if !overflowed_before && self.framer.is_overflowed() => {
                    sink.emit(&AppEvent::FramingOverflow);
                }
                None => {}
            }
        }
    }

    fn handle_message(
        &mut self,
        message: &InboundMessage,
        hw: &mut impl ActuatorPort,
        transport: &mut impl TransportPort,
        sink: &mut impl EventSink,
    ) -> DispatchKind {
        let text = message.text();
        let outcome = dispatch(match_command(&text), &text, &mut self.ctx, hw, &self.config);
        info!("CMD {:?} <- {:?}", outcome.kind, text);

        if let Err(e) = transport.write_text(&outcome.reply) {
            report_fault(e, sink);
        }
        sink.emit(&AppEvent::CommandHandled(outcome.kind));
        outcome.kind
    }

    fn regulate(&mut self, now_ms: u64, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let previous = self.thermostat.heating();
        let inside = self.ctx.sensors.temperature_inside;

        if let Some(HeatingDecision::Drive(on)) =
            self.thermostat.evaluate(now_ms, inside, &self.ctx.thermostat)
        {
            hw.set_heating(on);
            if previous != Some(on) {
                info!("heating {} at {:.1} C", if on { "on" } else { "off" }, inside);
                sink.emit(&AppEvent::HeatingChanged(on));
            }
        }
    }

    fn raise_alerts(&self, transport: &mut impl TransportPort, sink: &mut impl EventSink) -> usize {
        let raised = self.alerts.evaluate(&self.ctx.sensors);
        for alert in &raised {
            sink.emit(&AppEvent::AlertRaised(*alert));
            if let Err(e) = transport.write_text(alert.message()) {
                report_fault(e, sink);
            }
        }
        raised.len()
    }
}

fn report_fault(e: TransportError, sink: &mut impl EventSink) {
    warn!("transport fault: {}", e);
    sink.emit(&AppEvent::TransportFault(e));
}
