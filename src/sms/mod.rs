//! SMS link: byte framing and the GSM modem driver.
//!
//! ```text
//!   UART bytes ──▶ Sim900Modem (TransportPort) ──▶ MessageFramer ──▶ AppService
//!   AppService ──▶ Sim900Modem::write_text ──▶ AT+CMGS ──▶ UART
//! ```

pub mod framer;
pub mod modem;
pub mod serial;
