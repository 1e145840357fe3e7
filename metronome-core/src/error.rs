//! Error types for the metronome core.

use thiserror::Error;

/// Why a BPM text field could not be read as a tempo.
///
/// Never surfaced to the user: the controller recovers with the default tempo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BpmError {
    #[error("BPM field is empty")]
    Empty,

    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSignatureError {
    #[error("unsupported time signature '{0}'")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("minimum BPM must be at least 1, got {0}")]
    MinBpmTooLow(u32),

    #[error("BPM limits out of order: min {min}, default {default}, compound max {compound_max}, max {max}")]
    BpmOrder {
        min: u32,
        default: u32,
        compound_max: u32,
        max: u32,
    },

    #[error("{which} tone must have a non-zero frequency and duration")]
    SilentTone { which: &'static str },

    #[error("gain must be within 0.0..=1.0, got {0}")]
    Gain(f32),
}
