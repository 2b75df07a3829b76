use thiserror::Error;

/// Rejected effect configuration.
///
/// Mounted effects validate their configuration up front so the per-frame and
/// per-tick paths never have to guard against zero divisors or NaNs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{option}` must be a positive finite number, got {value}")]
    NotPositive { option: &'static str, value: f32 },
    #[error("`{option}` must be a non-negative finite number, got {value}")]
    Negative { option: &'static str, value: f32 },
    #[error("`{option}` must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        option: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("`{option}` must be non-zero")]
    Zero { option: &'static str },
    #[error("unknown `{option}` value `{value}`")]
    UnknownValue { option: &'static str, value: String },
}

pub(crate) fn require_positive(option: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { option, value })
    }
}

pub(crate) fn require_non_negative(option: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { option, value })
    }
}
