//! Whole stack on the simulated board: hw_init sim stubs under the real
//! hardware adapter and the real modem driver.
//!
//! The sim stubs are process globals, so this file holds a single test.

use embedded_hal::delay::DelayNs;

use smshome::adapters::hardware::HardwareAdapter;
use smshome::adapters::log_sink::LogEventSink;
use smshome::adapters::uart::UartSerial;
use smshome::app::dispatch::DispatchKind;
use smshome::app::service::AppService;
use smshome::config::SystemConfig;
use smshome::context::Device;
use smshome::drivers::hw_init;
use smshome::pins;
use smshome::sms::modem::Sim900Modem;

use super::mock_hw::MockClock;

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[test]
fn sms_toggles_relay_and_alerts_over_uart() {
    let config = SystemConfig::default();
    let mut hw = HardwareAdapter::board();
    let mut modem = Sim900Modem::new(UartSerial::new(), NoDelay, config.recipient.clone());
    let clock = MockClock::default();
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(config);

    app.start(&mut modem, &mut sink).unwrap();
    assert_eq!(
        hw_init::sim_uart_take_tx(),
        b"AT+CMGF=1\r\nAT+CNMI=2,2,0,0,0\r\nAT+CMGDA=\"DEL ALL\"\r\n"
    );

    hw_init::sim_uart_push_rx(b"\r\n+CMT: \"+37060000000\"\r\n#TV ON\n");
    let summary = app.cycle(&mut hw, &mut modem, &clock, &mut sink);

    assert_eq!(summary.handled, Some(DispatchKind::Toggled(Device::Tv)));
    assert!(hw.is_on(Device::Tv));
    assert!(hw_init::sim_gpio_level(pins::TV_GPIO));
    assert_eq!(
        hw_init::sim_uart_take_tx(),
        b"AT+CMGDA=\"DEL ALL\"\r\nAT+CMGS=\"+37060000000\"\r\nTV ON\x1a"
    );

    // Default DHT frame is 22 C: inside the band, heating untouched.
    assert_eq!(app.heating(), None);
    assert!(!hw.is_heating());

    hw_init::sim_set_adc(pins::ADC1_CH_WATER, 3_000);
    let summary = app.cycle(&mut hw, &mut modem, &clock, &mut sink);
    assert_eq!(summary.alerts_raised, 1);
    assert_eq!(
        hw_init::sim_uart_take_tx(),
        b"AT+CMGS=\"+37060000000\"\r\nWater detected\x1a"
    );

    // Back-to-back commands: the reply to the first must not swallow the second.
    hw_init::sim_set_adc(pins::ADC1_CH_WATER, 0);
    hw_init::sim_uart_push_rx(b"#TV OFF\n#GATE ON\n");
    let first = app.cycle(&mut hw, &mut modem, &clock, &mut sink);
    assert_eq!(first.handled, Some(DispatchKind::Toggled(Device::Tv)));
    assert!(!hw_init::sim_gpio_level(pins::TV_GPIO));

    let second = app.cycle(&mut hw, &mut modem, &clock, &mut sink);
    assert_eq!(second.handled, Some(DispatchKind::Toggled(Device::Gate)));
    assert!(hw_init::sim_gpio_level(pins::GATE_GPIO));
    assert_eq!(
        hw_init::sim_uart_take_tx(),
        b"AT+CMGDA=\"DEL ALL\"\r\nAT+CMGS=\"+37060000000\"\r\nTV OFF\x1a\
          AT+CMGDA=\"DEL ALL\"\r\nAT+CMGS=\"+37060000000\"\r\nGATE ON\x1a"
    );
}
