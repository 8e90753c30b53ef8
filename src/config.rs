//! System configuration parameters
//!
//! All tunable parameters for the SmsHome controller.  Defaults match the
//! deployed board; a JSON override may be supplied at startup.  Nothing is
//! persisted at runtime.

use serde::{Deserialize, Serialize};

/// Inbound message buffer capacity (bytes, including the terminator slot).
pub const MESSAGE_CAPACITY: usize = 20;
/// Byte that opens an inbound message.
pub const START_MARKER: u8 = b'#';
/// Byte that closes an inbound message.
pub const END_MARKER: u8 = b'\n';

/// Maximum length of the recipient phone number.
pub const RECIPIENT_CAPACITY: usize = 24;

/// What a threshold command without a numeric token does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingNumberPolicy {
    /// Apply `0.0`, as the field units always have.
    #[default]
    Zero,
    /// Refuse the command and answer "Missing number".
    Reject,
}

/// Whether threshold commands may invert the heating band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThresholdRangePolicy {
    /// Accept any value, even `min_inside > max_inside`.
    #[default]
    Permissive,
    /// Refuse values that would invert the band and answer "Bad range".
    Validated,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Heating band ---
    /// Heating turns on below this inside temperature (°C).
    pub min_inside_c: f32,
    /// Heating turns off above this inside temperature (°C).
    pub max_inside_c: f32,
    /// Minimum time between two heating decisions (milliseconds).
    pub heating_interval_ms: u64,

    // --- Alerts ---
    /// Raw water-level ADC reading above which "Water detected" is sent.
    pub water_max: u16,
    /// Raw smoke ADC reading above which "Smoke detected" is sent.
    pub smoke_max: u16,
    /// Boards without the MQ-2 populated leave this off.
    pub smoke_sensor_enabled: bool,

    // --- Messaging ---
    /// Phone number that receives replies and alerts.
    pub recipient: heapless::String<RECIPIENT_CAPACITY>,
    pub missing_number: MissingNumberPolicy,
    pub threshold_range: ThresholdRangePolicy,

    // --- Timing ---
    /// Pause between two control cycles (milliseconds).
    pub cycle_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut recipient = heapless::String::new();
        let _ = recipient.push_str("+37060000000");

        Self {
            min_inside_c: 20.0,
            max_inside_c: 24.0,
            heating_interval_ms: 5_000,

            water_max: 300,
            smoke_max: 300,
            smoke_sensor_enabled: true,

            recipient,
            missing_number: MissingNumberPolicy::Zero,
            threshold_range: ThresholdRangePolicy::Permissive,

            cycle_interval_ms: 1_000,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_inside_c.is_finite() || !self.max_inside_c.is_finite() {
            return Err(ConfigError::ValidationFailed("heating thresholds must be finite"));
        }
        if self.min_inside_c > self.max_inside_c {
            return Err(ConfigError::ValidationFailed("min_inside_c above max_inside_c"));
        }
        if self.heating_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("heating_interval_ms is zero"));
        }
        if self.cycle_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("cycle_interval_ms is zero"));
        }
        if self.recipient.is_empty() {
            return Err(ConfigError::ValidationFailed("recipient is empty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON override.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors from loading or validating a [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The override could not be deserialised.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("config corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
