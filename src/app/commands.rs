//! Inbound command vocabulary and matcher.
//!
//! A message is matched by unanchored, case-sensitive substring search
//! against [`VOCABULARY`], in table order; the first keyword found wins.
//! The table order *is* the dispatch priority:
//!
//! ```text
//! MIN TEMP > MAX TEMP > LIGHT OUTSIDE > LIGHT INSIDE > TV > GATE > STATUS
//! ```

use crate::context::Device;

/// Which end of the heating band a threshold command sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdBound {
    Min,
    Max,
}

/// Requested relay level of a toggle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// A recognised inbound command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `MIN TEMP <n>` / `MAX TEMP <n>`.  `value` is `None` when the message
    /// has no numeric token.
    SetThreshold {
        bound: ThresholdBound,
        value: Option<f32>,
    },
    /// `<DEVICE> ON|OFF`.  `switch` is `None` when neither word is present.
    Toggle {
        device: Device,
        switch: Option<Switch>,
    },
    /// `STATUS`: report temperatures and device states.
    Status,
}

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Threshold(ThresholdBound),
    Toggle(Device),
    Status,
}

/// Keywords in priority order.
static VOCABULARY: [(&str, Keyword); 7] = [
    ("MIN TEMP", Keyword::Threshold(ThresholdBound::Min)),
    ("MAX TEMP", Keyword::Threshold(ThresholdBound::Max)),
    ("LIGHT OUTSIDE", Keyword::Toggle(Device::LightOutside)),
    ("LIGHT INSIDE", Keyword::Toggle(Device::LightInside)),
    ("TV", Keyword::Toggle(Device::Tv)),
    ("GATE", Keyword::Toggle(Device::Gate)),
    ("STATUS", Keyword::Status),
];

/// Match a message against the vocabulary.  `None` means unknown command.
pub fn match_command(message: &str) -> Option<Command> {
    let (_, keyword) = VOCABULARY
        .iter()
        .find(|(word, _)| message.contains(word))?;

    let command = match *keyword {
        Keyword::Threshold(bound) => Command::SetThreshold {
            bound,
            value: find_number(message),
        },
        Keyword::Toggle(device) => Command::Toggle {
            device,
            switch: find_switch(message),
        },
        Keyword::Status => Command::Status,
    };
    Some(command)
}

/// `ON` is checked before `OFF`.
fn find_switch(message: &str) -> Option<Switch> {
    if message.contains("ON") {
        Some(Switch::On)
    } else if message.contains("OFF") {
        Some(Switch::Off)
    } else {
        None
    }
}

/// Value of the first whitespace-delimited token that starts with a digit.
///
/// The token is read as far as it looks like a decimal number with an
/// optional exponent, so `"21.5C"` yields `21.5` and `"2e1"` yields `20`.
pub fn find_number(message: &str) -> Option<f32> {
    message
        .split_whitespace()
        .find(|token| token.as_bytes().first().is_some_and(u8::is_ascii_digit))
        .map(leading_float)
}

/// [`find_number`], with `0.0` when the message has no numeric token.
pub fn extract_number(message: &str) -> f32 {
    find_number(message).unwrap_or(0.0)
}

/// Exponents beyond this already saturate an `f32`.
const MAX_EXPONENT: i32 = 64;

fn leading_float(token: &str) -> f32 {
    let bytes = token.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |n| start + n)
    };

    let mut end = digits_from(0);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    let mantissa: f32 = token[..end].trim_end_matches('.').parse().unwrap_or(0.0);

    let Some(exponent) = leading_exponent(&bytes[end..]) else {
        return mantissa;
    };
    (f64::from(mantissa) * 10f64.powi(exponent)) as f32
}

/// `[eE][+-]?digits` at the start of `rest`, clamped to [`MAX_EXPONENT`].
fn leading_exponent(rest: &[u8]) -> Option<i32> {
    let (marker, rest) = rest.split_first()?;
    if !marker.eq_ignore_ascii_case(&b'e') {
        return None;
    }
    let (negative, rest) = match rest.split_first() {
        Some((b'-', tail)) => (true, tail),
        Some((b'+', tail)) => (false, tail),
        _ => (false, rest),
    };
    let digits = rest.iter().take_while(|b| b.is_ascii_digit());
    let mut magnitude: Option<i32> = None;
    for d in digits {
        let acc = magnitude.unwrap_or(0);
        magnitude = Some((acc * 10 + i32::from(d - b'0')).min(MAX_EXPONENT));
    }
    magnitude.map(|m| if negative { -m } else { m })
}
