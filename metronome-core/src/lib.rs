// metronome-core/src/lib.rs

//! The core logic for the metronome.
//! This crate is responsible for tempo arithmetic, the beat controller,
//! the tick chain timer and tone synthesis. It is completely headless
//! and contains no GUI code.

pub mod audio;
pub mod config;
pub mod error;
pub mod metronome;
pub mod synth;
pub mod tempo;
pub mod time_signature;
pub mod timer;

pub use config::MetronomeConfig;
pub use metronome::{Metronome, MetronomeState};
pub use time_signature::TimeSignature;
pub use timer::{ChainToken, ScheduledTick};

use std::time::Duration;

/// A single tone request handed to the audio output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tone {
    /// Pitch in Hz.
    pub frequency_hz: u32,
    /// How long the tone sounds, in milliseconds.
    pub duration_ms: u32,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self { frequency_hz, duration_ms }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }
}

/// Which tone a beat gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// First beat of a measure.
    Downbeat,
    /// Every other beat.
    Offbeat,
}

/// The metronome's view of the GUI shell.
///
/// The controller never holds on to the panel; it is handed in for each
/// operation so the live widget values are read at the moment they matter.
pub trait ControlPanel {
    /// Current contents of the BPM text field.
    fn bpm_text(&self) -> String;
    /// Overwrites the BPM text field (used to reflect a clamped value).
    fn set_bpm_text(&mut self, text: &str);
    /// Currently selected time signature.
    fn time_signature(&self) -> TimeSignature;
    /// Shows the beat counter.
    fn show_beat(&mut self, beat: u32);
}

/// Fire-and-forget tone playback.
pub trait ToneOutput {
    fn play_tone(&mut self, tone: Tone);
}

/// Output that drops every tone. Used when no audio device could be opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentOutput;

impl ToneOutput for SilentOutput {
    fn play_tone(&mut self, tone: Tone) {
        tracing::trace!(?tone, "silent output dropped tone");
    }
}
