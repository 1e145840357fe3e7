//! # Audio Output Module
//!
//! This module handles click playback using CPAL (Cross-Platform Audio Library).
//! Tone requests arrive over a channel and are rendered inside the output
//! callback, so the GUI thread never waits on the device.
//!
//! ## Features
//! - Automatic output device selection
//! - Sample rate chosen as close to 44.1 kHz as the device allows
//! - Any channel count; the click is written to every channel

use crate::Tone;
use crate::synth::ToneSynth;
use anyhow::{Result, anyhow};
use cpal::SupportedStreamConfigRange;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Receiver;

/// Preferred output sample rate in Hz.
pub const TARGET_SAMPLE_RATE: u32 = 44_100;

/// Opens the default output device and starts a stream that plays every
/// tone received on `receiver`.
///
/// # Returns
/// * `Ok((stream, sample_rate))` - Playing stream handle and its sample rate
/// * `Err(e)` - No device, no f32 format, or the stream failed to start
///
/// The stream stops when the returned handle is dropped.
pub fn start_tone_stream(receiver: Receiver<Tone>, gain: f32) -> Result<(cpal::Stream, u32)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;

    tracing::info!("Using audio output device: {}", device.name()?);

    let configs = device.supported_output_configs()?.collect::<Vec<_>>();
    let supported_config = find_supported_config(configs, TARGET_SAMPLE_RATE)
        .ok_or_else(|| anyhow!("No suitable f32 output format found"))?;

    let sample_rate_val = pick_sample_rate(&supported_config, TARGET_SAMPLE_RATE);
    let config = supported_config.with_sample_rate(cpal::SampleRate(sample_rate_val));
    let channels = config.channels() as usize;
    let config: cpal::StreamConfig = config.into();

    tracing::info!(sample_rate = sample_rate_val, channels, "output stream configured");

    let err_fn = |err| tracing::error!("An error occurred on the audio stream: {}", err);

    let mut synth = ToneSynth::new(sample_rate_val, gain);

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            // Only the newest request matters; each one cuts off the last.
            while let Ok(tone) = receiver.try_recv() {
                synth.trigger(tone);
            }
            synth.render(data, channels);
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok((stream, sample_rate_val))
}

/// Picks the f32 configuration whose sample rate range comes closest to
/// `target_rate`, preferring fewer channels on a tie.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let rate = pick_sample_rate(c, target_rate);
            ((rate as i64 - target_rate as i64).abs(), c.channels())
        })
}

fn pick_sample_rate(config: &SupportedStreamConfigRange, target_rate: u32) -> u32 {
    target_rate.clamp(config.min_sample_rate().0, config.max_sample_rate().0)
}
