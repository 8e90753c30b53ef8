//! Delimited message framer.
//!
//! Wire format (one message):
//! ```text
//! ... noise ... '#' payload bytes ... '\n'
//! ```
//!
//! Bytes outside a `#`…`\n` pair are discarded.  The framer keeps its
//! state between calls, so a message may arrive spread over many polling
//! cycles.
//!
//! ## Overflow
//!
//! The buffer holds [`MESSAGE_CAPACITY`] bytes, and the last slot is a
//! scratch cell: once `capacity - 1` bytes are stored, every further byte
//! overwrites that cell in place, and the terminator later lands on it.
//! The emitted message therefore keeps the first `capacity - 1` bytes.
//! Overflow never ends a message; only the end marker does.

use std::borrow::Cow;

use log::warn;

use crate::config::{END_MARKER, MESSAGE_CAPACITY, START_MARKER};

/// A complete inbound message (never contains the delimiters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    bytes: heapless::Vec<u8, MESSAGE_CAPACITY>,
    truncated: bool,
}

impl InboundMessage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Message text; invalid UTF-8 is replaced, never rejected.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if bytes were dropped because the message overflowed.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

/// Framer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerState {
    /// Discarding bytes until a start marker.
    Idle,
    /// Collecting payload until an end marker.
    Accumulating,
}

/// Streaming message framer.
pub struct MessageFramer {
    state: FramerState,
    buf: heapless::Vec<u8, MESSAGE_CAPACITY>,
    overflowed: bool,
}

impl Default for MessageFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFramer {
    pub fn new() -> Self {
        Self {
            state: FramerState::Idle,
            buf: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte.  Returns the message when `byte` closes one.
    pub fn feed(&mut self, byte: u8) -> Option<InboundMessage> {
        match self.state {
            FramerState::Idle => {
                if byte == START_MARKER {
                    self.state = FramerState::Accumulating;
                }
                None
            }
            FramerState::Accumulating if byte == END_MARKER => Some(self.terminate()),
            FramerState::Accumulating => {
                self.accumulate(byte);
                None
            }
        }
    }

    pub fn state(&self) -> FramerState {
        self.state
    }

    /// Bytes held for the message in progress (the write index).
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the message in progress has overflowed.
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Drop any partial message and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = FramerState::Idle;
        self.buf.clear();
        self.overflowed = false;
    }

    fn accumulate(&mut self, byte: u8) {
        if self.buf.len() < MESSAGE_CAPACITY - 1 {
            // Cannot fail: below capacity.
            let _ = self.buf.push(byte);
            return;
        }

        // Overflow: the scratch cell takes the newest byte.
        if !self.overflowed {
            warn!("Inbound message too long, truncating to {} bytes", MESSAGE_CAPACITY - 1);
            self.overflowed = true;
        }
        if let Err(byte) = self.buf.push(byte) {
            if let Some(last) = self.buf.last_mut() {
                *last = byte;
            }
        }
    }

    fn terminate(&mut self) -> InboundMessage {
        // The terminator overwrites the scratch cell.
        self.buf.truncate(MESSAGE_CAPACITY - 1);
        // Text ends at the first NUL, as on the modem side.
        if let Some(nul) = self.buf.iter().position(|&b| b == 0) {
            self.buf.truncate(nul);
        }

        let message = InboundMessage {
            bytes: core::mem::take(&mut self.buf),
            truncated: self.overflowed,
        };
        self.state = FramerState::Idle;
        self.overflowed = false;
        message
    }
}
