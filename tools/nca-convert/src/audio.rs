//! Audio import (WAV -> stereo f64)

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader};
use nca_common::AudioClip;
use std::path::Path;

/// Load a WAV file as a two-channel clip.
///
/// Integer samples are normalized to [-1, 1]. Mono input is duplicated to
/// both channels and channels past the second are dropped.
pub fn load_audio_clip(input: &Path) -> Result<AudioClip> {
    let reader =
        WavReader::open(input).with_context(|| format!("Failed to open WAV: {:?}", input))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<f64>, _>>(),
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<Vec<f64>, _>>()
        }
    }
    .with_context(|| format!("Failed to read samples: {:?}", input))?;

    if channels > 2 {
        tracing::warn!(
            "{:?} has {} channels; only the first two are kept",
            input,
            channels
        );
    }

    let (left, right) = split_channels(&samples, channels);
    tracing::debug!(
        "Loaded audio {:?}: {} Hz, {} channels, {} samples per channel",
        input,
        spec.sample_rate,
        channels,
        left.len()
    );

    Ok(AudioClip::from_channels(left, right)?)
}

/// Split interleaved samples into left and right channels
pub fn split_channels(samples: &[f64], channels: usize) -> (Vec<f64>, Vec<f64>) {
    match channels {
        0 => (Vec::new(), Vec::new()),
        1 => (samples.to_vec(), samples.to_vec()),
        n => samples
            .chunks_exact(n)
            .map(|frame| (frame[0], frame[1]))
            .unzip(),
    }
}
