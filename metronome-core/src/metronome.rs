//! # Metronome Controller
//!
//! Owns the session state and drives the tick chain. The GUI shell and the
//! audio device are reached only through the [`ControlPanel`] and
//! [`ToneOutput`] capabilities, so the whole controller runs headless in
//! tests.
//!
//! ## Flow
//! 1. `start` reads the BPM field, bounds it and plays the first beat at once
//! 2. every `tick` re-reads the time signature, advances the counter, clicks
//!    and books the next tick
//! 3. `stop` cancels the chain; the tick already in flight becomes a no-op

use crate::config::MetronomeConfig;
use crate::error::ConfigError;
use crate::tempo;
use crate::timer::{ChainToken, ScheduledTick, TickChain};
use crate::{Accent, ControlPanel, Tone, ToneOutput};
use std::time::{Duration, Instant};

/// Snapshot of the running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetronomeState {
    pub running: bool,
    pub bpm: u32,
    pub beats_per_measure: u32,
    /// Silence between the end of one click and the start of the next.
    pub interval_ms: u64,
    /// Beats played in the current measure; back to 0 once a measure completes.
    pub beat_count: u32,
}

#[derive(Debug)]
pub struct Metronome<O: ToneOutput> {
    config: MetronomeConfig,
    output: O,
    state: MetronomeState,
    chain: TickChain,
}

impl<O: ToneOutput> Metronome<O> {
    /// Creates a stopped metronome with the default settings.
    pub fn new(output: O) -> Self {
        Self {
            config: MetronomeConfig::default(),
            output,
            state: MetronomeState::default(),
            chain: TickChain::default(),
        }
    }

    pub fn with_config(config: MetronomeConfig, output: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(output)
        })
    }

    pub fn state(&self) -> &MetronomeState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Starts the metronome and plays the first beat immediately.
    ///
    /// Does nothing while already running, so repeated presses never start a
    /// second chain. An unreadable BPM field falls back to the default tempo;
    /// a tempo outside the allowed range is clamped and written back to the
    /// field.
    ///
    /// Returns the tick the caller must deliver back through [`Metronome::tick`].
    pub fn start<P>(&mut self, panel: &mut P, now: Instant) -> Option<ScheduledTick>
    where
        P: ControlPanel + ?Sized,
    {
        if self.state.running {
            tracing::debug!("start ignored, metronome already running");
            return None;
        }

        let signature = panel.time_signature();
        let resolved = tempo::resolve_bpm(&panel.bpm_text(), signature, &self.config);
        if resolved.adjusted {
            panel.set_bpm_text(&resolved.bpm.to_string());
        }
        self.state.bpm = resolved.bpm;
        self.state.running = true;

        let token = self.chain.arm(now);
        tracing::info!(bpm = resolved.bpm, %signature, "metronome started");
        self.tick(token, panel, now)
    }

    /// Stops the metronome. Safe to call while already stopped.
    pub fn stop(&mut self) {
        if self.state.running {
            tracing::info!(beat = self.state.beat_count, "metronome stopped");
        }
        self.state.running = false;
        self.chain.cancel();
    }

    /// Plays one beat and books the next.
    ///
    /// Ticks from a cancelled chain, or arriving after `stop`, return `None`
    /// without touching the counter or the output.
    ///
    /// The returned deadline is one full musical period away: click length
    /// plus `interval_ms`, not `interval_ms` alone.
    pub fn tick<P>(&mut self, token: ChainToken, panel: &mut P, now: Instant) -> Option<ScheduledTick>
    where
        P: ControlPanel + ?Sized,
    {
        if !self.state.running || !self.chain.is_live(token) {
            tracing::trace!(?token, "stale tick dropped");
            return None;
        }

        // The signature may change between beats.
        let beats_per_measure = panel.time_signature().beats_per_measure();
        let click = self.config.click_length();
        self.state.beats_per_measure = beats_per_measure;
        self.state.interval_ms = tempo::interval_ms(self.state.bpm, beats_per_measure, click);

        self.state.beat_count += 1;
        panel.show_beat(self.state.beat_count);

        let accent = self.accent_and_wrap();
        let tone = self.tone_for(accent);
        tracing::debug!(
            beat = self.state.beat_count,
            ?accent,
            interval_ms = self.state.interval_ms,
            "tick"
        );
        self.output.play_tone(tone);

        let period = click + Duration::from_millis(self.state.interval_ms);
        self.chain.schedule(token, now, period)
    }

    // The first beat of a measure is accented. Reaching the last beat closes
    // the measure; the counter is reset only after it has been displayed.
    fn accent_and_wrap(&mut self) -> Accent {
        if self.state.beat_count == 1 {
            Accent::Downbeat
        } else {
            if self.state.beat_count >= self.state.beats_per_measure {
                self.state.beat_count = 0;
            }
            Accent::Offbeat
        }
    }

    fn tone_for(&self, accent: Accent) -> Tone {
        match accent {
            Accent::Downbeat => self.config.downbeat,
            Accent::Offbeat => self.config.offbeat,
        }
    }
}
