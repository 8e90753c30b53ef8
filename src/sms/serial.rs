//! Byte link between the controller and the GSM modem.
//!
//! The modem speaks AT commands on the way out and pushes unsolicited SMS
//! text (`+CMT: ...` followed by the body) on the way in, interleaved
//! with its own `OK` and `+CMGS` answers.  [`Sim900Modem`](super::modem::Sim900Modem)
//! sorts that out; a `SerialPort` only moves bytes.  On the board it is
//! [`UartSerial`](crate::adapters::uart::UartSerial) on UART1.

/// Raw byte channel to the modem.
pub trait SerialPort {
    type Error: core::fmt::Debug;

    /// Copy whatever the modem has already sent into `buf` without waiting.
    ///
    /// `Ok(0)` means the receive buffer is empty.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Queue `data` for the modem; may accept fewer bytes than offered.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Block until queued bytes are on the wire, so AT delays start after
    /// the command really went out.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// True when inbound bytes are waiting.
    fn available(&self) -> bool;
}

/// Stand-in for an unplugged modem: writes vanish and nothing arrives.
pub struct NullSerial;

impl SerialPort for NullSerial {
    type Error = ();

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn available(&self) -> bool {
        false
    }
}
