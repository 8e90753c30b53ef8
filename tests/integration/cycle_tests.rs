//! Per-cycle orchestration: framing across polls, one message per cycle,
//! thermostat hysteresis and repeated alerts.

use smshome::app::dispatch::DispatchKind;
use smshome::app::events::AppEvent;
use smshome::config::SystemConfig;
use smshome::context::Device;
use smshome::sms::framer::FramerState;

use super::mock_hw::{ActuatorCall, Harness};

#[test]
fn start_initialises_and_purges_once() {
    let h = Harness::new();
    assert_eq!(h.link.inits, 1);
    assert_eq!(h.link.purges, 1);
    assert_eq!(h.sink.events, vec![AppEvent::Started]);
}

#[test]
fn idle_cycle_sends_nothing() {
    let mut h = Harness::new();
    let summary = h.cycle();
    assert_eq!(summary.handled, None);
    assert_eq!(summary.alerts_raised, 0);
    assert!(h.link.sent.is_empty());
    assert_eq!(h.app.cycle_count(), 1);
}

#[test]
fn noise_around_message_is_ignored() {
    let mut h = Harness::new();
    h.link.push(b"+CMT: \"+370\",\"\",\"24/01/01\"\r\n#TV ON\n\r\nOK\r\n");
    let summary = h.cycle();
    assert_eq!(summary.handled, Some(DispatchKind::Toggled(Device::Tv)));
    assert_eq!(h.link.sent, vec!["TV ON"]);
}

#[test]
fn message_split_across_cycles() {
    let mut h = Harness::new();
    h.link.push(b"#GATE O");
    assert_eq!(h.cycle().handled, None);
    assert_eq!(h.app.framer().state(), FramerState::Accumulating);
    assert_eq!(h.app.framer().pending_len(), 6);

    h.link.push(b"N\n");
    assert_eq!(h.cycle().handled, Some(DispatchKind::Toggled(Device::Gate)));
    assert!(h.app.devices().gate);
    assert_eq!(h.app.framer().state(), FramerState::Idle);
}

#[test]
fn one_message_per_cycle_rest_waits() {
    let mut h = Harness::new();
    h.receive("TV ON");
    h.receive("GATE ON");

    assert_eq!(h.cycle().handled, Some(DispatchKind::Toggled(Device::Tv)));
    assert!(!h.app.devices().gate);
    assert!(!h.link.rx.is_empty(), "second message must stay queued");

    assert_eq!(h.cycle().handled, Some(DispatchKind::Toggled(Device::Gate)));
    assert_eq!(h.link.sent, vec!["TV ON", "GATE ON"]);
    assert!(h.link.rx.is_empty());
}

#[test]
fn inbox_purged_after_each_message() {
    let mut h = Harness::new();
    h.receive("STATUS");
    h.cycle();
    h.receive("STATUS");
    h.cycle();
    // One at start, one per message.
    assert_eq!(h.link.purges, 3);
}

#[test]
fn message_received_event_carries_length() {
    let mut h = Harness::new();
    h.receive("LIGHT INSIDE ON");
    h.cycle();
    assert!(h.sink.events.contains(&AppEvent::MessageReceived(15)));
    assert!(h
        .sink
        .events
        .contains(&AppEvent::CommandHandled(DispatchKind::Toggled(Device::LightInside))));
}

#[test]
fn overflowing_message_truncated_and_flagged() {
    let mut h = Harness::new();
    h.receive(&"A".repeat(30));
    let summary = h.cycle();

    assert_eq!(summary.handled, Some(DispatchKind::Unknown));
    assert_eq!(h.sink.count(|e| *e == AppEvent::FramingOverflow), 1);
    assert!(h.sink.events.contains(&AppEvent::MessageReceived(19)));
    assert_eq!(h.link.sent, vec!["Unknown command"]);
}

#[test]
fn drain_budget_bounds_one_cycle() {
    let mut h = Harness::new();
    h.link.push(&[b'x'; 2_000]);
    assert_eq!(h.cycle().handled, None);
    assert_eq!(h.link.reads, 512);
    assert_eq!(h.link.rx.len(), 2_000 - 512);
}

// ── Thermostat ────────────────────────────────────────────────

#[test]
fn heating_follows_band_with_hysteresis() {
    let mut h = Harness::new();
    let steps = [(0, 18.0), (5_000, 22.0), (10_000, 26.0), (15_000, 22.0)];
    for (now, temp) in steps {
        h.clock.now = now;
        h.hw.inside = Ok(temp);
        h.cycle();
    }

    assert_eq!(h.hw.heating_calls(), vec![true, false]);
    assert_eq!(h.app.heating(), Some(false));
    assert_eq!(
        h.sink.count(|e| matches!(e, AppEvent::HeatingChanged(_))),
        2
    );
}

#[test]
fn heating_rate_limited_by_interval() {
    let mut h = Harness::new();
    h.hw.inside = Ok(18.0);
    h.cycle();

    h.clock.now = 1_000;
    h.hw.inside = Ok(30.0);
    h.cycle();
    assert_eq!(h.app.heating(), Some(true), "too early to switch off");

    h.clock.now = 5_000;
    h.cycle();
    assert_eq!(h.app.heating(), Some(false));
}

#[test]
fn relay_redriven_each_eligible_cycle() {
    let mut h = Harness::new();
    h.hw.inside = Ok(15.0);
    for now in [0, 5_000, 10_000] {
        h.clock.now = now;
        h.cycle();
    }
    assert_eq!(h.hw.heating_calls(), vec![true, true, true]);
    assert_eq!(
        h.sink.count(|e| *e == AppEvent::HeatingChanged(true)),
        1,
        "event only on change"
    );
}

#[test]
fn threshold_change_applies_in_same_cycle() {
    let mut h = Harness::new();
    h.hw.inside = Ok(22.0);
    h.receive("MAX TEMP 21");
    let summary = h.cycle();

    assert_eq!(summary.handled, Some(DispatchKind::ThresholdSet));
    assert_eq!(h.hw.calls, vec![ActuatorCall::SetHeating(false)]);
}

#[test]
fn failed_probe_keeps_last_temperature() {
    let mut h = Harness::new();
    h.hw.inside = Ok(18.0);
    h.cycle();

    h.clock.now = 5_000;
    h.hw.inside = Err(smshome::error::SensorError::Timeout);
    h.cycle();

    assert!((h.app.context().sensors.temperature_inside - 18.0).abs() < f32::EPSILON);
    assert_eq!(h.hw.heating_calls(), vec![true, true]);
}

// ── Alerts ────────────────────────────────────────────────────

#[test]
fn water_alert_repeats_every_cycle() {
    let mut h = Harness::new();
    h.hw.water = 500;
    for _ in 0..3 {
        assert_eq!(h.cycle().alerts_raised, 1);
    }
    assert_eq!(h.link.sent, vec!["Water detected"; 3]);
}

#[test]
fn both_alerts_after_reply() {
    let mut h = Harness::new();
    h.hw.water = 301;
    h.hw.smoke = 301;
    h.receive("TV OFF");
    let summary = h.cycle();
    assert_eq!(summary.alerts_raised, 2);
    assert_eq!(h.link.sent, vec!["TV OFF", "Water detected", "Smoke detected"]);
}

#[test]
fn threshold_is_strictly_greater() {
    let mut h = Harness::new();
    h.hw.water = 300;
    h.hw.smoke = 300;
    assert_eq!(h.cycle().alerts_raised, 0);
}

#[test]
fn smoke_sensor_disabled_is_never_read() {
    let config = SystemConfig {
        smoke_sensor_enabled: false,
        ..SystemConfig::default()
    };
    let mut h = Harness::with_config(config);
    h.hw.smoke = 4_000;
    assert_eq!(h.cycle().alerts_raised, 0);
    assert_eq!(h.hw.smoke_reads, 0);
    assert_eq!(h.app.context().sensors.smoke_level, None);
}
