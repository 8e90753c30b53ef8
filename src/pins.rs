//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth: every driver references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Relays (active HIGH)
// ---------------------------------------------------------------------------

pub const TV_GPIO: i32 = 4;
pub const LIGHT_OUTSIDE_GPIO: i32 = 5;
pub const LIGHT_INSIDE_GPIO: i32 = 6;
pub const GATE_GPIO: i32 = 7;
pub const HEATING_GPIO: i32 = 15;

/// Every relay output, configured together at boot and driven LOW.
pub const RELAY_GPIOS: [i32; 5] = [
    TV_GPIO,
    LIGHT_OUTSIDE_GPIO,
    LIGHT_INSIDE_GPIO,
    GATE_GPIO,
    HEATING_GPIO,
];

// ---------------------------------------------------------------------------
// Sensors: DHT11 single-wire temperature probes
// ---------------------------------------------------------------------------

pub const DHT_INSIDE_GPIO: i32 = 16;
pub const DHT_OUTSIDE_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Sensors: analog (ADC1, 12-bit, 12 dB attenuation)
// ---------------------------------------------------------------------------

/// Water-level probe, ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const ADC1_CH_WATER: u32 = 0;
/// MQ-2 smoke sensor, ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const ADC1_CH_SMOKE: u32 = 1;

// ---------------------------------------------------------------------------
// GSM modem UART
// ---------------------------------------------------------------------------

pub const MODEM_UART_PORT: i32 = 1;
pub const MODEM_UART_TX_GPIO: i32 = 43;
pub const MODEM_UART_RX_GPIO: i32 = 44;
pub const MODEM_BAUD: i32 = 19_200;
/// Driver RX ring size in bytes.
pub const MODEM_RX_BUFFER: i32 = 1024;
