//! # Tempo Module
//!
//! Turns the text of the BPM field into a bounded tempo, and a tempo into
//! the delay between clicks.

use crate::config::MetronomeConfig;
use crate::error::BpmError;
use crate::time_signature::TimeSignature;
use std::num::IntErrorKind;
use std::time::Duration;

/// Signatures with this many beats per measure are counted in eighths,
/// doubling the click rate for a given BPM.
const COMPOUND_BEATS_PER_MEASURE: u32 = 6;

/// A tempo after parsing and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBpm {
    pub bpm: u32,
    /// True when the value was clamped and the BPM field should be rewritten.
    pub adjusted: bool,
}

/// Parses a BPM field as a whole number. Surrounding whitespace is ignored.
///
/// Integers too long for `i64` saturate rather than fail; they are still
/// numbers and get clamped like any other out-of-range tempo.
pub fn parse_bpm(input: &str) -> Result<i64, BpmError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BpmError::Empty);
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(BpmError::NotANumber(trimmed.to_string())),
        },
    }
}

/// Bounds a tempo to the range allowed for `signature`.
pub fn clamp_bpm(value: i64, signature: TimeSignature, config: &MetronomeConfig) -> ResolvedBpm {
    let max = i64::from(config.max_bpm_for(signature));
    let min = i64::from(config.min_bpm);
    let bpm = value.clamp(min, max);
    ResolvedBpm {
        bpm: bpm as u32,
        adjusted: bpm != value,
    }
}

/// Reads the BPM field, falling back to the configured default when it is
/// not a number. A fallback is not an adjustment: the field is left as typed.
pub fn resolve_bpm(input: &str, signature: TimeSignature, config: &MetronomeConfig) -> ResolvedBpm {
    match parse_bpm(input) {
        Ok(value) => clamp_bpm(value, signature, config),
        Err(err) => {
            tracing::debug!(%err, default_bpm = config.default_bpm, "using default tempo");
            ResolvedBpm {
                bpm: config.default_bpm,
                adjusted: false,
            }
        }
    }
}

/// Milliseconds of silence between the end of one click and the start of
/// the next.
///
/// `click` is the length of the tone itself; it is taken off the musical
/// period so that click onsets land exactly on the beat. `bpm` must be at
/// least 1.
pub fn interval_ms(bpm: u32, beats_per_measure: u32, click: Duration) -> u64 {
    let clicks_per_beat = if beats_per_measure == COMPOUND_BEATS_PER_MEASURE { 2.0 } else { 1.0 };
    let seconds = 60.0 / (f64::from(bpm) * clicks_per_beat) - click.as_secs_f64();
    (seconds * 1000.0).round().max(0.0) as u64
}
