//! # Configuration Module
//!
//! Compiled-in metronome settings. Nothing is loaded from disk; the struct is
//! serde-friendly so an embedding application can supply its own values.

use crate::Tone;
use crate::error::ConfigError;
use crate::time_signature::TimeSignature;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tempo used when the BPM field cannot be parsed.
pub const DEFAULT_BPM: u32 = 60;
/// Tempo ceiling for simple (quarter-note) signatures.
pub const MAX_BPM: u32 = 300;
/// Tempo ceiling for compound (eighth-note) signatures.
pub const MAX_COMPOUND_BPM: u32 = 200;
pub const MIN_BPM: u32 = 1;

/// First beat of every measure.
pub const DOWNBEAT_TONE: Tone = Tone::new(900, 100);
/// All other beats.
pub const OFFBEAT_TONE: Tone = Tone::new(440, 100);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetronomeConfig {
    pub default_bpm: u32,
    pub min_bpm: u32,
    pub max_bpm: u32,
    pub max_compound_bpm: u32,
    pub downbeat: Tone,
    pub offbeat: Tone,
    /// Linear output gain applied by the synthesizer.
    pub gain: f32,
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            default_bpm: DEFAULT_BPM,
            min_bpm: MIN_BPM,
            max_bpm: MAX_BPM,
            max_compound_bpm: MAX_COMPOUND_BPM,
            downbeat: DOWNBEAT_TONE,
            offbeat: OFFBEAT_TONE,
            gain: 0.5,
        }
    }
}

impl MetronomeConfig {
    /// Highest tempo allowed for the given signature.
    pub fn max_bpm_for(&self, signature: TimeSignature) -> u32 {
        if signature.is_compound() {
            self.max_compound_bpm
        } else {
            self.max_bpm
        }
    }

    /// Length of the longest click. The tick chain leaves this much room
    /// for the tone before the interval starts counting.
    pub fn click_length(&self) -> Duration {
        self.downbeat.duration().max(self.offbeat.duration())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_bpm < 1 {
            return Err(ConfigError::MinBpmTooLow(self.min_bpm));
        }
        let ordered = self.min_bpm <= self.default_bpm
            && self.default_bpm <= self.max_compound_bpm
            && self.max_compound_bpm <= self.max_bpm;
        if !ordered {
            return Err(ConfigError::BpmOrder {
                min: self.min_bpm,
                default: self.default_bpm,
                compound_max: self.max_compound_bpm,
                max: self.max_bpm,
            });
        }
        for (which, tone) in [("downbeat", self.downbeat), ("offbeat", self.offbeat)] {
            if tone.frequency_hz == 0 || tone.duration_ms == 0 {
                return Err(ConfigError::SilentTone { which });
            }
        }
        if !(0.0..=1.0).contains(&self.gain) {
            return Err(ConfigError::Gain(self.gain));
        }
        Ok(())
    }
}
