//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to               |
//! |------------|--------------------|---------------------------|
//! | `hardware` | SensorPort         | DHT11 probes, ADC1        |
//! |            | ActuatorPort       | Relay GPIOs               |
//! | `log_sink` | EventSink          | Serial log output         |
//! | `time`     | ClockPort          | ESP32 system timer        |
//! | `uart`     | SerialPort         | Modem UART                |
//!
//! The transport port itself is implemented by
//! [`Sim900Modem`](crate::sms::modem::Sim900Modem) on top of `uart`.

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod uart;
