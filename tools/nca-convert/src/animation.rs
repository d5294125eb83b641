//! Skeletal animation import from glTF

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use gltf::animation::util::ReadOutputs;
use gltf::animation::{Interpolation, Property};
use hashbrown::HashMap;
use nca_common::{
    PositionFrame, RotationFrame, ScaleFrame, SkeletalAnimationClip, SkeletalAnimationFrames,
};
use std::path::Path;

use crate::error::ImportError;
use crate::geometry::GltfSource;
use crate::skeleton::node_name;

/// Keyframe times are stored in milliseconds
pub const TICKS_PER_SECOND: f64 = 1000.0;

/// Load an animation (named, or the first) as keyframes per bone
pub fn load_animation(input: &Path, name: Option<&str>) -> Result<SkeletalAnimationClip> {
    let source = GltfSource::open(input)?;
    let animation = match name {
        Some(name) => source
            .document
            .animations()
            .find(|a| a.name() == Some(name))
            .ok_or_else(|| ImportError::missing("animation", name, input))?,
        None => source
            .document
            .animations()
            .next()
            .with_context(|| format!("No animations found in {:?}", input))?,
    };

    let clip_name = animation
        .name()
        .map(str::to_string)
        .or_else(|| input.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let mut frames_per_bone: HashMap<String, SkeletalAnimationFrames> = HashMap::new();
    let mut last_tick = 0.0f32;

    for channel in animation.channels() {
        let bone = node_name(&channel.target().node());
        let cubic = channel.sampler().interpolation() == Interpolation::CubicSpline;
        let reader = channel.reader(|buffer| Some(&source.buffers[buffer.index()]));

        let times: Vec<f32> = reader
            .read_inputs()
            .context("Animation channel has no keyframe times")?
            .map(|seconds| (seconds as f64 * TICKS_PER_SECOND) as f32)
            .collect();
        last_tick = times.iter().copied().fold(last_tick, f32::max);

        let Some(outputs) = reader.read_outputs() else {
            continue;
        };
        let frames = frames_per_bone.entry(bone).or_default();
        match (channel.target().property(), outputs) {
            (Property::Translation, ReadOutputs::Translations(values)) => {
                let values = keyed_values(values.map(Vec3::from).collect(), cubic);
                frames.position_frames.extend(times.iter().zip(values).map(|(&t, position)| {
                    PositionFrame {
                        time_in_ticks: t,
                        position,
                    }
                }));
            }
            (Property::Rotation, ReadOutputs::Rotations(values)) => {
                let values = keyed_values(values.into_f32().map(Quat::from_array).collect(), cubic);
                frames.rotation_frames.extend(times.iter().zip(values).map(|(&t, rotation)| {
                    RotationFrame {
                        time_in_ticks: t,
                        rotation,
                    }
                }));
            }
            (Property::Scale, ReadOutputs::Scales(values)) => {
                let values = keyed_values(values.map(Vec3::from).collect(), cubic);
                frames.scale_frames.extend(times.iter().zip(values).map(|(&t, scale)| {
                    ScaleFrame {
                        time_in_ticks: t,
                        scale,
                    }
                }));
            }
            (property, _) => {
                tracing::debug!("Skipping {:?} channel", property);
            }
        }
    }

    frames_per_bone.retain(|_, frames| !frames.is_empty());
    for frames in frames_per_bone.values_mut() {
        sort_frames(frames);
    }

    tracing::debug!(
        "Animation '{}': {} bones, {} ticks",
        clip_name,
        frames_per_bone.len(),
        last_tick
    );

    Ok(SkeletalAnimationClip {
        name: clip_name,
        duration_in_ticks: last_tick.ceil() as u32,
        ticks_per_second: TICKS_PER_SECOND,
        frames_per_bone,
    })
}

/// Cubic spline samplers store (in-tangent, value, out-tangent) per key;
/// keep only the values
fn keyed_values<T>(values: Vec<T>, cubic: bool) -> Vec<T> {
    if cubic {
        values.into_iter().skip(1).step_by(3).collect()
    } else {
        values
    }
}

/// Channels may be split across samplers; keep each track in time order
fn sort_frames(frames: &mut SkeletalAnimationFrames) {
    frames
        .position_frames
        .sort_by(|a, b| a.time_in_ticks.total_cmp(&b.time_in_ticks));
    frames
        .rotation_frames
        .sort_by(|a, b| a.time_in_ticks.total_cmp(&b.time_in_ticks));
    frames
        .scale_frames
        .sort_by(|a, b| a.time_in_ticks.total_cmp(&b.time_in_ticks));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_spline_keeps_values() {
        let raw = vec![0, 1, 2, 10, 11, 12, 20, 21, 22];
        assert_eq!(keyed_values(raw.clone(), true), [1, 11, 21]);
        assert_eq!(keyed_values(raw, false).len(), 9);
    }

    #[test]
    fn test_frames_sorted_by_time() {
        let mut frames = SkeletalAnimationFrames {
            scale_frames: vec![
                ScaleFrame {
                    time_in_ticks: 500.0,
                    scale: Vec3::ONE,
                },
                ScaleFrame {
                    time_in_ticks: 0.0,
                    scale: Vec3::splat(2.0),
                },
            ],
            ..Default::default()
        };
        sort_frames(&mut frames);
        assert_eq!(frames.scale_frames[0].time_in_ticks, 0.0);
    }
}
