//! SIM900 GSM modem driver (text mode).
//!
//! Implements [`TransportPort`] as a sequence of AT commands separated by
//! fixed delays.  There is no response parsing: after each command the
//! modem's answer is drained and dropped up to the first start marker.
//! From the marker on the bytes are an inbound SMS, so they are held back
//! and served by `read_byte` ahead of the UART.  Every wait is bounded, so
//! a silent modem slows the cycle down but never hangs it.
//!
//! | Operation        | AT sequence                                      |
//! |------------------|--------------------------------------------------|
//! | `init_text_mode` | `AT+CMGF=1`, `AT+CNMI=2,2,0,0,0`                 |
//! | `write_text`     | `AT+CMGS="<recipient>"`, text, Ctrl-Z            |
//! | `purge_inbox`    | `AT+CMGDA="DEL ALL"`                             |

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::app::ports::TransportPort;
use crate::config::{RECIPIENT_CAPACITY, START_MARKER};
use crate::error::TransportError;

use super::serial::SerialPort;

/// Ends an SMS body.
const CTRL_Z: u8 = 0x1A;
/// Longest AT command we build (`AT+CMGS="<number>"\r\n`).
const AT_CMD_CAPACITY: usize = 48;
/// Upper bound on bytes dropped while draining one response.
const MAX_DRAIN_BYTES: usize = 512;
/// Bytes pulled from the port per read while draining.
const SCRATCH_LEN: usize = 32;

const SETTLE_MS: u32 = 1_000;
const BODY_MS: u32 = 100;
const PURGE_MS: u32 = 500;

/// GSM modem on a byte serial port.
pub struct Sim900Modem<S: SerialPort, D: DelayNs> {
    serial: S,
    delay: D,
    recipient: heapless::String<RECIPIENT_CAPACITY>,
    /// Inbound bytes read during a drain, oldest first.
    held: heapless::Deque<u8, SCRATCH_LEN>,
}

impl<S: SerialPort, D: DelayNs> Sim900Modem<S, D> {
    pub fn new(serial: S, delay: D, recipient: heapless::String<RECIPIENT_CAPACITY>) -> Self {
        Self {
            serial,
            delay,
            recipient,
            held: heapless::Deque::new(),
        }
    }

    /// Access the underlying port (tests inspect what was written).
    pub fn serial(&self) -> &S {
        &self.serial
    }

    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let mut offset = 0;
        while offset < data.len() {
            let n = self.serial.write(&data[offset..]).map_err(|e| {
                warn!("modem write failed: {:?}", e);
                TransportError::Serial
            })?;
            if n == 0 {
                return Err(TransportError::Serial);
            }
            offset += n;
        }
        self.serial.flush().map_err(|e| {
            warn!("modem flush failed: {:?}", e);
            TransportError::Serial
        })
    }

    fn command(&mut self, at: &str) -> Result<(), TransportError> {
        debug!("modem <- {}", at);
        self.send(at.as_bytes())?;
        self.send(b"\r\n")
    }

    /// Wait for the modem to answer, then throw the answer away.
    ///
    /// Draining stops at the first start marker; that chunk's tail is
    /// held and everything after it stays in the port.
    fn discard_response(&mut self) -> Result<(), TransportError> {
        self.delay.delay_ms(SETTLE_MS);
        let mut scratch = [0u8; SCRATCH_LEN];
        let mut dropped = 0;
        while self.held.is_empty() && self.serial.available() && dropped < MAX_DRAIN_BYTES {
            let n = self
                .serial
                .read(&mut scratch)
                .map_err(|_| TransportError::Serial)?;
            if n == 0 {
                break;
            }
            let chunk = &scratch[..n];
            match chunk.iter().position(|&b| b == START_MARKER) {
                Some(at) => {
                    // `held` is empty and a chunk never exceeds its capacity.
                    for &b in &chunk[at..] {
                        let _ = self.held.push_back(b);
                    }
                    dropped += at;
                }
                None => dropped += n,
            }
        }
        if dropped > 0 {
            debug!("modem answer dropped ({} bytes)", dropped);
        }
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }
}

impl<S: SerialPort, D: DelayNs> TransportPort for Sim900Modem<S, D> {
    fn init_text_mode(&mut self) -> Result<(), TransportError> {
        self.command("AT+CMGF=1")?;
        self.delay.delay_ms(SETTLE_MS);
        // Deliver new SMS straight to the serial port.
        self.command("AT+CNMI=2,2,0,0,0")?;
        self.delay.delay_ms(SETTLE_MS);
        self.discard_response()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        if let Some(b) = self.held.pop_front() {
            return Ok(Some(b));
        }
        if !self.serial.available() {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.serial.read(&mut byte) {
            Ok(1) => Ok(Some(byte[0])),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("modem read failed: {:?}", e);
                Err(TransportError::Serial)
            }
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), TransportError> {
        let mut cmd = heapless::String::<AT_CMD_CAPACITY>::new();
        write!(cmd, "AT+CMGS=\"{}\"", self.recipient).map_err(|_| TransportError::CommandTooLong)?;
        self.command(&cmd)?;
        self.delay.delay_ms(SETTLE_MS);
        self.send(text.as_bytes())?;
        self.delay.delay_ms(BODY_MS);
        self.send(&[CTRL_Z])?;
        self.delay.delay_ms(SETTLE_MS);
        self.discard_response()
    }

    fn purge_inbox(&mut self) -> Result<(), TransportError> {
        self.command("AT+CMGDA=\"DEL ALL\"")?;
        self.delay.delay_ms(PURGE_MS);
        debug!("modem inbox purged");
        Ok(())
    }
}
