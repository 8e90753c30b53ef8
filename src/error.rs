//! Unified error types for the SmsHome firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the cycle
//! loop can log any failure the same way and keep running.  All variants
//! are `Copy`; nothing here allocates.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The message transport (modem / serial link) failed.
    Transport(TransportError),
    /// A sensor could not be read.
    Sensor(SensorError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The underlying serial port reported an error.
    Serial,
    /// An AT command did not fit the command buffer.
    CommandTooLong,
    /// The link is not available (e.g. modem powered down).
    Unavailable,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => write!(f, "serial I/O failed"),
            Self::CommandTooLong => write!(f, "AT command too long"),
            Self::Unavailable => write!(f, "link unavailable"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer the start signal.
    NoResponse,
    /// A bit or the whole frame timed out mid-transfer.
    Timeout,
    /// Frame checksum mismatch.
    Checksum,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => write!(f, "no response"),
            Self::Timeout => write!(f, "read timed out"),
            Self::Checksum => write!(f, "checksum mismatch"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Reasons a recognised command is refused instead of applied.
///
/// A refusal is answered by SMS and never escalates into [`Error`].
/// Only produced when the stricter policies in
/// [`SystemConfig`](crate::config::SystemConfig) are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// A threshold command carried no numeric token.
    MissingNumber,
    /// The new threshold would leave `min_inside > max_inside`.
    BadRange,
}

impl CommandError {
    /// Reply text sent back to the requester.
    pub const fn reply(self) -> &'static str {
        match self {
            Self::MissingNumber => "Missing number",
            Self::BadRange => "Bad range",
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNumber => write!(f, "missing numeric argument"),
            Self::BadRange => write!(f, "min threshold above max threshold"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
