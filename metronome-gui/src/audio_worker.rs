//! # Audio Worker
//!
//! Owns the output stream on a dedicated thread. The GUI thread only ever
//! pushes tone requests into a bounded channel and never blocks on audio.

use anyhow::{Result, anyhow};
use cpal::traits::StreamTrait;
use crossbeam_channel::Sender;
use metronome_core::{SilentOutput, Tone, ToneOutput, audio};
use std::thread::{self, JoinHandle};

/// Pending tones before new requests are dropped. Clicks are at least 50ms
/// apart, so a handful is plenty.
const TONE_QUEUE: usize = 8;

/// Audio worker thread management structure.
#[derive(Debug)]
pub struct ToneWorker {
    tone_tx: Sender<Tone>,
    shutdown_tx: Sender<()>,              // Channel to send shutdown signal
    thread_handle: Option<JoinHandle<()>>, // Handle to the audio thread
}

impl ToneWorker {
    /// Spawns the audio thread and waits until its stream is playing.
    pub fn spawn(gain: f32) -> Result<Self> {
        let (tone_tx, tone_rx) = crossbeam_channel::bounded::<Tone>(TONE_QUEUE);
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<Result<u32>>(1);

        let thread_handle = thread::Builder::new()
            .name("tone-output".to_string())
            .spawn(move || {
                tracing::info!("[AUDIO-THREAD] Starting tone output...");
                let stream = match audio::start_tone_stream(tone_rx, gain) {
                    Ok((stream, sample_rate)) => {
                        let _ = ready_tx.send(Ok(sample_rate));
                        stream
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                // Parked until shutdown is requested or the worker is dropped.
                let _ = shutdown_rx.recv();

                tracing::info!("[AUDIO-THREAD] Stopping stream and exiting...");
                if let Err(e) = stream.pause() {
                    tracing::warn!("[AUDIO-THREAD] Error pausing stream: {}", e);
                }
                drop(stream);
            })?;

        match ready_rx.recv() {
            Ok(Ok(sample_rate)) => {
                tracing::info!(sample_rate, "Tone output started");
                Ok(Self {
                    tone_tx,
                    shutdown_tx,
                    thread_handle: Some(thread_handle),
                })
            }
            Ok(Err(e)) => {
                let _ = thread_handle.join();
                Err(e)
            }
            Err(_) => Err(anyhow!("tone output thread exited during setup")),
        }
    }
}

impl ToneOutput for ToneWorker {
    fn play_tone(&mut self, tone: Tone) {
        if let Err(e) = self.tone_tx.try_send(tone) {
            tracing::warn!("Dropped tone {:?}: {}", tone, e);
        }
    }
}

impl Drop for ToneWorker {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                tracing::error!("[AUDIO-THREAD] Tone output thread panicked");
            }
        }
    }
}

/// Whatever the application ended up playing clicks through.
#[derive(Debug)]
pub enum AppOutput {
    Device(ToneWorker),
    /// No usable output device; the metronome still counts.
    Silent(SilentOutput),
}

impl AppOutput {
    /// Opens the default device, falling back to silence if that fails.
    pub fn open(gain: f32) -> Self {
        match ToneWorker::spawn(gain) {
            Ok(worker) => AppOutput::Device(worker),
            Err(e) => {
                tracing::warn!("Audio output unavailable, continuing without sound: {:#}", e);
                AppOutput::Silent(SilentOutput)
            }
        }
    }
}

impl ToneOutput for AppOutput {
    fn play_tone(&mut self, tone: Tone) {
        match self {
            AppOutput::Device(worker) => worker.play_tone(tone),
            AppOutput::Silent(silent) => silent.play_tone(tone),
        }
    }
}
