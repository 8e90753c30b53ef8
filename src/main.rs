//! SMS home controller firmware, main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter    Sim900Modem<UartSerial>  SystemClock │
//! │  (Sensor+Actuator)  (Transport)              (Clock)     │
//! │  LogEventSink                                            │
//! │  (EventSink)                                             │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │             AppService (pure logic)                │  │
//! │  │  Framer · Dispatch · Thermostat · Alerts           │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use log::{error, info, warn};

use smshome::adapters::hardware::HardwareAdapter;
use smshome::adapters::log_sink::LogEventSink;
use smshome::adapters::time::SystemClock;
use smshome::adapters::uart::UartSerial;
use smshome::app::service::AppService;
use smshome::config::SystemConfig;
use smshome::drivers::hw_init;
use smshome::sms::modem::Sim900Modem;

/// Optional JSON override baked in at build time.
const CONFIG_OVERRIDE: Option<&str> = option_env!("SMSHOME_CONFIG");

fn load_config() -> SystemConfig {
    let Some(json) = CONFIG_OVERRIDE else {
        return SystemConfig::default();
    };
    match SystemConfig::from_json(json) {
        Ok(cfg) => {
            info!("Config loaded from SMSHOME_CONFIG");
            cfg
        }
        Err(e) => {
            warn!("SMSHOME_CONFIG rejected ({}), using defaults", e);
            SystemConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SMS home controller v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without relays and the modem there is nothing useful to do.
        error!("HAL init failed: {}, halting", e);
        loop {
            FreeRtos::delay_ms(1_000);
        }
    }

    // ── 3. Config ─────────────────────────────────────────────
    let config = load_config();
    let interval_ms = config.cycle_interval_ms;

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::board();
    let mut modem = Sim900Modem::new(UartSerial::new(), FreeRtos, config.recipient.clone());
    let clock = SystemClock::new();
    let mut log_sink = LogEventSink::new();

    // ── 5. Service ────────────────────────────────────────────
    let mut app = AppService::new(config);
    if let Err(e) = app.start(&mut modem, &mut log_sink) {
        warn!("modem bring-up incomplete ({}), cycling anyway", e);
    }

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        app.cycle(&mut hw, &mut modem, &clock, &mut log_sink);
        FreeRtos::delay_ms(interval_ms);
    }
}
