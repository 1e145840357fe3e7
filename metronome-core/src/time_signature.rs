//! # Time Signature Module
//!
//! The fixed set of time signatures the metronome offers. Signatures are
//! only ever selected, never constructed at runtime, so the set is an enum.

use crate::error::TimeSignatureError;
use std::fmt;
use std::str::FromStr;

/// A supported time signature, as (beats per measure, beat unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeSignature {
    #[default]
    FourFour,
    TwoFour,
    ThreeFour,
    SixEight,
}

impl TimeSignature {
    /// Every signature, in selector order.
    pub const ALL: [TimeSignature; 4] = [
        TimeSignature::FourFour,
        TimeSignature::TwoFour,
        TimeSignature::ThreeFour,
        TimeSignature::SixEight,
    ];

    pub fn beats_per_measure(self) -> u32 {
        match self {
            TimeSignature::FourFour => 4,
            TimeSignature::TwoFour => 2,
            TimeSignature::ThreeFour => 3,
            TimeSignature::SixEight => 6,
        }
    }

    pub fn beat_unit(self) -> u32 {
        match self {
            TimeSignature::SixEight => 8,
            _ => 4,
        }
    }

    /// Eighth-note based signatures get the lower tempo ceiling.
    pub fn is_compound(self) -> bool {
        self.beat_unit() == 8
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|&sig| sig == self)
            .unwrap_or_default()
    }

    /// The following signature in selector order, wrapping after the last.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The preceding signature in selector order, wrapping before the first.
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats_per_measure(), self.beat_unit())
    }
}

impl FromStr for TimeSignature {
    type Err = TimeSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|sig| sig.to_string() == trimmed)
            .ok_or_else(|| TimeSignatureError::Unknown(trimmed.to_string()))
    }
}
