//! Fuzz target: `MessageFramer::feed`
//!
//! Drives arbitrary byte streams into the framer and asserts that every
//! emitted message fits the buffer, never contains a delimiter, and that
//! the framer is back to `Idle` right after each one.
//!
//! cargo fuzz run fuzz_framer

#![no_main]

use libfuzzer_sys::fuzz_target;
use smshome::config::{END_MARKER, MESSAGE_CAPACITY};
use smshome::sms::framer::{FramerState, MessageFramer};

fuzz_target!(|data: &[u8]| {
    let mut framer = MessageFramer::new();

    for &byte in data {
        if let Some(message) = framer.feed(byte) {
            assert!(message.len() < MESSAGE_CAPACITY, "message exceeds capacity - 1");
            assert!(!message.as_bytes().contains(&END_MARKER));
            assert!(!message.as_bytes().contains(&0));
            assert_eq!(framer.state(), FramerState::Idle);
            let _ = message.text();
        }
        assert!(framer.pending_len() <= MESSAGE_CAPACITY);
    }

    framer.reset();
    assert_eq!(framer.state(), FramerState::Idle);
    assert_eq!(framer.pending_len(), 0);
});
