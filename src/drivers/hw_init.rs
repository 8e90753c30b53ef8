//! One-shot hardware peripheral initialization and raw I/O helpers.
//!
//! Configures ADC channels, relay GPIOs, DHT11 data lines and the modem
//! UART using raw ESP-IDF sys calls.  Called once from `main()` before the
//! control loop starts.
//!
//! On the host every helper is backed by in-memory state, with `sim_*`
//! functions to inject readings and inspect outputs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error types ───────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "modem UART init failed (rc={})", rc),
        }
    }
}

/// Raw ESP-IDF error code from a UART call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartFault(pub i32);

impl core::fmt::Display for UartFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "UART fault (rc={})", self.0)
    }
}

/// Raw DHT11 frame: humidity int/dec, temperature int/dec, checksum.
pub type DhtFrame = [u8; 5];

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_dht_lines()?;
        init_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// control-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::ADC1_CH_WATER, pins::ADC1_CH_SMOKE] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!("hw_init: ADC1 configured (CH{}=water, CH{}=smoke)", pins::ADC1_CH_WATER, pins::ADC1_CH_SMOKE);
    Ok(())
}

/// Raw 12-bit reading, 0 on a driver error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded control-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    sim::adc(channel)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &pin in &pins::RELAY_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: relay outputs configured, all LOW");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an output configured in
    // init_gpio_outputs(). Control loop only.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::set_gpio(pin, high);
}

// ── DHT11 single-wire bus ─────────────────────────────────────

/// Start pulse the host holds the line LOW for.
#[cfg(target_os = "espidf")]
const DHT_START_LOW_US: u32 = 18_000;
/// Longest any single line level lasts in a healthy frame.
#[cfg(target_os = "espidf")]
const DHT_LEVEL_TIMEOUT_US: i64 = 100;
/// A HIGH pulse longer than this encodes a 1 bit (0 ≈ 27 us, 1 ≈ 70 us).
#[cfg(target_os = "espidf")]
const DHT_ONE_THRESHOLD_US: i64 = 40;

#[cfg(target_os = "espidf")]
unsafe fn init_dht_lines() -> Result<(), HwInitError> {
    for pin in [pins::DHT_INSIDE_GPIO, pins::DHT_OUTSIDE_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        // Idle high.
        unsafe { gpio_set_level(pin, 1) };
    }
    info!("hw_init: DHT11 lines configured");
    Ok(())
}

/// Busy-wait while `pin` sits at `level`; returns how long it stayed.
#[cfg(target_os = "espidf")]
fn dht_wait_while(pin: i32, level: i32) -> Result<i64, SensorError> {
    // SAFETY: timer and GPIO register reads on a configured open-drain line.
    let start = unsafe { esp_timer_get_time() };
    loop {
        let elapsed = unsafe { esp_timer_get_time() } - start;
        if unsafe { gpio_get_level(pin) } != level {
            return Ok(elapsed);
        }
        if elapsed > DHT_LEVEL_TIMEOUT_US {
            return Err(SensorError::Timeout);
        }
    }
}

/// Clock one 40-bit frame out of the sensor on `pin`.
#[cfg(target_os = "espidf")]
pub fn dht11_read(pin: i32) -> Result<DhtFrame, SensorError> {
    // SAFETY: single-threaded control loop owns both DHT lines.
    unsafe {
        gpio_set_level(pin, 0);
        esp_rom_delay_us(DHT_START_LOW_US);
        gpio_set_level(pin, 1);
        esp_rom_delay_us(30);
    }

    // Sensor answers with ~80 us LOW then ~80 us HIGH.
    dht_wait_while(pin, 1).map_err(|_| SensorError::NoResponse)?;
    dht_wait_while(pin, 0).map_err(|_| SensorError::NoResponse)?;
    dht_wait_while(pin, 1).map_err(|_| SensorError::NoResponse)?;

    let mut frame: DhtFrame = [0; 5];
    for bit in 0..40 {
        dht_wait_while(pin, 0)?;
        let high_us = dht_wait_while(pin, 1)?;
        if high_us > DHT_ONE_THRESHOLD_US {
            frame[bit / 8] |= 0x80 >> (bit % 8);
        }
    }
    Ok(frame)
}

#[cfg(not(target_os = "espidf"))]
pub fn dht11_read(pin: i32) -> Result<DhtFrame, SensorError> {
    sim::dht(pin)
}

// ── Modem UART ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::MODEM_BAUD,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { uart_param_config(pins::MODEM_UART_PORT, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    let ret = unsafe {
        uart_set_pin(
            pins::MODEM_UART_PORT,
            pins::MODEM_UART_TX_GPIO,
            pins::MODEM_UART_RX_GPIO,
            -1,
            -1,
        )
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    let ret = unsafe {
        uart_driver_install(
            pins::MODEM_UART_PORT,
            pins::MODEM_RX_BUFFER,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    info!("hw_init: modem UART{} at {} baud", pins::MODEM_UART_PORT, pins::MODEM_BAUD);
    Ok(())
}

/// Whether the modem UART has buffered input.
#[cfg(target_os = "espidf")]
pub fn uart_available() -> bool {
    let mut len: usize = 0;
    // SAFETY: driver installed in init_uart(); len is a valid out-pointer.
    let ret = unsafe { uart_get_buffered_data_len(pins::MODEM_UART_PORT, &mut len) };
    ret == ESP_OK as i32 && len > 0
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_available() -> bool {
    sim::uart_available()
}

/// Non-blocking single-byte read from the modem UART.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte() -> Result<Option<u8>, UartFault> {
    let mut byte = 0u8;
    // SAFETY: one-byte buffer on the stack, zero ticks timeout.
    let n = unsafe {
        uart_read_bytes(pins::MODEM_UART_PORT, (&raw mut byte).cast(), 1, 0)
    };
    match n {
        1 => Ok(Some(byte)),
        0 => Ok(None),
        rc => Err(UartFault(rc)),
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte() -> Result<Option<u8>, UartFault> {
    Ok(sim::uart_pop())
}

/// Queue `data` for transmission; returns how many bytes were accepted.
#[cfg(target_os = "espidf")]
pub fn uart_write(data: &[u8]) -> Result<usize, UartFault> {
    // SAFETY: data outlives the call; the driver copies into its TX ring.
    let n = unsafe { uart_write_bytes(pins::MODEM_UART_PORT, data.as_ptr().cast(), data.len()) };
    usize::try_from(n).map_err(|_| UartFault(n))
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(data: &[u8]) -> Result<usize, UartFault> {
    sim::uart_push_tx(data);
    Ok(data.len())
}

/// Block until the TX FIFO has drained (bounded to 100 ticks).
#[cfg(target_os = "espidf")]
pub fn uart_flush() -> Result<(), UartFault> {
    // SAFETY: driver installed in init_uart().
    let ret = unsafe { uart_wait_tx_done(pins::MODEM_UART_PORT, 100) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(UartFault(ret)) }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_flush() -> Result<(), UartFault> {
    Ok(())
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub use sim::{
    sim_gpio_level, sim_set_adc, sim_set_dht, sim_uart_push_rx, sim_uart_take_tx,
};

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU16, AtomicU64, Ordering};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::DhtFrame;
    use crate::error::SensorError;
    use crate::pins;

    static GPIO_LEVELS: AtomicU64 = AtomicU64::new(0);
    static ADC: [AtomicU16; 2] = [AtomicU16::new(0), AtomicU16::new(0)];
    /// 22 C, 50 % RH.
    const DEFAULT_FRAME: DhtFrame = [50, 0, 22, 0, 72];
    static DHT: Mutex<[Result<DhtFrame, SensorError>; 2]> =
        Mutex::new([Ok(DEFAULT_FRAME), Ok(DEFAULT_FRAME)]);
    static UART_RX: Mutex<VecDeque<u8>> = Mutex::new(VecDeque::new());
    static UART_TX: Mutex<Vec<u8>> = Mutex::new(Vec::new());

    pub(super) fn set_gpio(pin: i32, high: bool) {
        let bit = 1u64 << pin;
        if high {
            GPIO_LEVELS.fetch_or(bit, Ordering::Relaxed);
        } else {
            GPIO_LEVELS.fetch_and(!bit, Ordering::Relaxed);
        }
    }

    /// Last level written to `pin`.
    pub fn sim_gpio_level(pin: i32) -> bool {
        GPIO_LEVELS.load(Ordering::Relaxed) & (1u64 << pin) != 0
    }

    pub(super) fn adc(channel: u32) -> u16 {
        ADC.get(channel as usize).map_or(0, |a| a.load(Ordering::Relaxed))
    }

    pub fn sim_set_adc(channel: u32, raw: u16) {
        if let Some(a) = ADC.get(channel as usize) {
            a.store(raw, Ordering::Relaxed);
        }
    }

    fn dht_slot(pin: i32) -> usize {
        usize::from(pin != pins::DHT_INSIDE_GPIO)
    }

    pub(super) fn dht(pin: i32) -> Result<DhtFrame, SensorError> {
        DHT.lock().map_or(Err(SensorError::NoResponse), |d| d[dht_slot(pin)])
    }

    /// Next frames the sensor on `pin` will return.
    pub fn sim_set_dht(pin: i32, frame: Result<DhtFrame, SensorError>) {
        if let Ok(mut d) = DHT.lock() {
            d[dht_slot(pin)] = frame;
        }
    }

    pub(super) fn uart_available() -> bool {
        UART_RX.lock().is_ok_and(|q| !q.is_empty())
    }

    pub(super) fn uart_pop() -> Option<u8> {
        UART_RX.lock().ok().and_then(|mut q| q.pop_front())
    }

    pub(super) fn uart_push_tx(data: &[u8]) {
        if let Ok(mut tx) = UART_TX.lock() {
            tx.extend_from_slice(data);
        }
    }

    /// Queue bytes as if the modem had sent them.
    pub fn sim_uart_push_rx(data: &[u8]) {
        if let Ok(mut q) = UART_RX.lock() {
            q.extend(data.iter().copied());
        }
    }

    /// Everything written to the modem since the last call.
    pub fn sim_uart_take_tx() -> Vec<u8> {
        UART_TX.lock().map(|mut tx| core::mem::take(&mut *tx)).unwrap_or_default()
    }
}
