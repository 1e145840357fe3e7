//! # Tone Synthesizer
//!
//! Renders metronome clicks as short sine bursts. One tone sounds at a time;
//! a new trigger cuts off whatever is playing. The edges of each burst are
//! ramped so the click does not pop.

use crate::Tone;
use std::f32::consts::TAU;

/// Length of the fade in and fade out, in milliseconds.
const RAMP_MS: u32 = 5;

#[derive(Debug, Clone)]
pub struct ToneSynth {
    sample_rate: u32,
    gain: f32,
    phase: f32,
    step: f32,
    position: u32,
    length: u32,
    ramp: u32,
}

impl ToneSynth {
    pub fn new(sample_rate: u32, gain: f32) -> Self {
        Self {
            sample_rate,
            gain,
            phase: 0.0,
            step: 0.0,
            position: 0,
            length: 0,
            ramp: 0,
        }
    }

    pub fn trigger(&mut self, tone: Tone) {
        let length = (u64::from(self.sample_rate) * u64::from(tone.duration_ms) / 1000) as u32;
        self.length = length;
        self.ramp = (self.sample_rate * RAMP_MS / 1000).min(length / 2);
        self.step = TAU * tone.frequency_hz as f32 / self.sample_rate as f32;
        self.phase = 0.0;
        self.position = 0;
    }

    pub fn is_active(&self) -> bool {
        self.position < self.length
    }

    pub fn next_sample(&mut self) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        let sample = self.phase.sin() * self.envelope() * self.gain;
        self.phase = (self.phase + self.step) % TAU;
        self.position += 1;
        sample
    }

    /// Fills an interleaved buffer, writing the same sample to every channel.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            frame.fill(sample);
        }
    }

    fn envelope(&self) -> f32 {
        if self.ramp == 0 {
            return 1.0;
        }
        let edge = self.position.min(self.length - self.position);
        (edge as f32 / self.ramp as f32).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 48_000;

    #[test]
    fn test_idle_synth_is_silent() {
        let mut synth = ToneSynth::new(RATE, 0.5);
        let mut buffer = [1.0f32; 64];
        synth.render(&mut buffer, 2);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_tone_lasts_its_duration() {
        let mut synth = ToneSynth::new(RATE, 0.5);
        synth.trigger(Tone::new(440, 100));

        let mut sounding = 0;
        while synth.is_active() {
            synth.next_sample();
            sounding += 1;
        }
        assert_eq!(sounding, 4_800);
        assert_eq!(synth.next_sample(), 0.0);
    }

    #[test]
    fn test_amplitude_bounded_by_gain() {
        let mut synth = ToneSynth::new(RATE, 0.25);
        synth.trigger(Tone::new(900, 100));

        let mut buffer = vec![0.0f32; 4_800];
        synth.render(&mut buffer, 1);
        let peak = buffer.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= 0.25 + f32::EPSILON);
        assert!(peak > 0.2, "tone too quiet: {peak}");
        // Ramped edges.
        assert_eq!(buffer[0], 0.0);
        assert!(buffer[4_799].abs() < 0.01);
    }

    #[test]
    fn test_channels_share_a_sample() {
        let mut synth = ToneSynth::new(RATE, 0.5);
        synth.trigger(Tone::new(440, 100));

        let mut buffer = [0.0f32; 600];
        synth.render(&mut buffer, 2);
        for frame in buffer.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn test_retrigger_restarts_tone() {
        let mut synth = ToneSynth::new(RATE, 0.5);
        synth.trigger(Tone::new(440, 100));
        for _ in 0..4_000 {
            synth.next_sample();
        }
        synth.trigger(Tone::new(900, 100));

        let mut sounding = 0;
        while synth.is_active() {
            synth.next_sample();
            sounding += 1;
        }
        assert_eq!(sounding, 4_800);
    }
}
