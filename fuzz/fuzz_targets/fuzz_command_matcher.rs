//! Fuzz target: `match_command` and `extract_number`
//!
//! Any text, valid UTF-8 or lossily decoded, must match without panicking
//! and yield only non-negative thresholds.
//!
//! cargo fuzz run fuzz_command_matcher

#![no_main]

use libfuzzer_sys::fuzz_target;
use smshome::app::commands::{extract_number, match_command, Command};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let n = extract_number(&text);
    assert!(!n.is_nan());
    assert!(n >= 0.0, "digits-only tokens cannot be negative");

    if let Some(Command::SetThreshold { value: Some(v), .. }) = match_command(&text) {
        assert!(v >= 0.0);
    }
});
