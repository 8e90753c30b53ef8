//! Modem UART adapter.
//!
//! Implements [`SerialPort`] over the hw_init UART helpers, so the
//! [`Sim900Modem`](crate::sms::modem::Sim900Modem) drives the real UART
//! on device and the simulated byte queues on the host.

use crate::drivers::hw_init::{self, UartFault};
use crate::sms::serial::SerialPort;

/// The UART the GSM shield is wired to (see [`crate::pins`]).
#[derive(Default)]
pub struct UartSerial;

impl UartSerial {
    pub fn new() -> Self {
        Self
    }
}

impl SerialPort for UartSerial {
    type Error = UartFault;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, UartFault> {
        let mut n = 0;
        while n < buf.len() {
            match hw_init::uart_read_byte()? {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, UartFault> {
        hw_init::uart_write(data)
    }

    fn flush(&mut self) -> Result<(), UartFault> {
        hw_init::uart_flush()
    }

    fn available(&self) -> bool {
        hw_init::uart_available()
    }
}
