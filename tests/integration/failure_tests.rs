//! Transport failures are reported and never stop the cycle.

use smshome::app::dispatch::DispatchKind;
use smshome::app::events::AppEvent;
use smshome::app::service::AppService;
use smshome::config::SystemConfig;
use smshome::context::Device;
use smshome::error::{Error, TransportError};

use super::mock_hw::{Harness, MockTransport, RecordingSink};

fn faults(sink: &RecordingSink) -> usize {
    sink.count(|e| matches!(e, AppEvent::TransportFault(_)))
}

#[test]
fn start_reports_init_failure_but_still_purges() {
    let mut app = AppService::new(SystemConfig::default());
    let mut link = MockTransport {
        fail_init: true,
        ..MockTransport::default()
    };
    let mut sink = RecordingSink::new();

    assert_eq!(
        app.start(&mut link, &mut sink),
        Err(Error::Transport(TransportError::Serial))
    );
    assert_eq!(link.purges, 1);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::TransportFault(TransportError::Serial),
            AppEvent::Started
        ]
    );
}

#[test]
fn reply_failure_still_applies_command() {
    let mut h = Harness::new();
    h.link.fail_writes = true;
    h.receive("TV ON");
    let summary = h.cycle();

    assert_eq!(summary.handled, Some(DispatchKind::Toggled(Device::Tv)));
    assert!(h.app.devices().tv);
    assert!(h
        .sink
        .events
        .contains(&AppEvent::TransportFault(TransportError::Unavailable)));
}

#[test]
fn alert_send_failure_counts_alert() {
    let mut h = Harness::new();
    h.link.fail_writes = true;
    h.hw.water = 1_000;
    assert_eq!(h.cycle().alerts_raised, 1);
    assert_eq!(faults(&h.sink), 1);
}

#[test]
fn read_failure_skips_framing_not_control() {
    let mut h = Harness::new();
    h.link.fail_reads = true;
    h.hw.inside = Ok(15.0);
    h.hw.water = 900;
    let summary = h.cycle();

    assert_eq!(summary.handled, None);
    assert_eq!(h.link.reads, 1, "drain stops at the first read error");
    assert_eq!(h.hw.heating_calls(), vec![true]);
    assert_eq!(summary.alerts_raised, 1);
    assert_eq!(h.link.sent, vec!["Water detected"]);
    assert_eq!(faults(&h.sink), 1);
}

#[test]
fn purge_failure_does_not_drop_message() {
    let mut h = Harness::new();
    h.link.fail_purge = true;
    h.receive("GATE ON");
    assert_eq!(h.cycle().handled, Some(DispatchKind::Toggled(Device::Gate)));
    assert_eq!(h.link.sent, vec!["GATE ON"]);
    assert_eq!(faults(&h.sink), 1);
}

#[test]
fn link_recovers_next_cycle() {
    let mut h = Harness::new();
    h.link.fail_reads = true;
    h.receive("STATUS");
    assert_eq!(h.cycle().handled, None);

    h.link.fail_reads = false;
    assert_eq!(h.cycle().handled, Some(DispatchKind::Status));
}
