//! Configuration errors.
//!
//! Gameplay mistakes (wrong arrow, bad timing, timeout) are state transitions,
//! not errors. Only bad configuration is reported through this type.

use thiserror::Error;

/// Errors raised while validating or loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Green window must satisfy 0 <= start <= end <= 1 (got {start}..{end})")]
    InvalidGreenWindow { start: f32, end: f32 },

    #[error("Starting length {starting} exceeds max length {max}")]
    LengthOutOfRange { starting: usize, max: usize },

    #[error("Starting length must be at least 1")]
    EmptySequence,

    #[error("Session needs at least one round")]
    NoRounds,

    #[error("Round time must be positive (got {0})")]
    NonPositiveRoundTime(f32),

    #[error("Stagger duration must be positive (got {0})")]
    NonPositiveStagger(f32),

    #[error("{name} must be finite and non-negative (got {value})")]
    InvalidDuration { name: &'static str, value: f32 },

    #[error("Failed to parse settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Reject negative, NaN and infinite values
pub(crate) fn check_duration(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { name, value })
    }
}
