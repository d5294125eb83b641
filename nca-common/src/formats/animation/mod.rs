//! Skeletal animation clip blob (tag `SKEL`)
//!
//! # Layout
//! ```text
//! name string
//! duration_in_ticks u32
//! ticks_per_second f64
//! bone_count u64
//! bone_count × (sorted by bone name) {
//!     bone_name string
//!     position_count u64, position_count × { time f32, position Vec3 }
//!     rotation_count u64, rotation_count × { time f32, rotation Quat }
//!     scale_count u64,    scale_count    × { time f32, scale Vec3 }
//! }
//! ```
//!
//! Bones are written in name order so identical clips encode identically.

mod types;

#[cfg(test)]
mod tests;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use super::blob_size;
use super::header::{AssetType, NcaHeader};
use super::serialization::NcaAsset;
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{NcaError, Result};

pub use types::{
    POSITION_FRAME_SIZE, PositionFrame, ROTATION_FRAME_SIZE, RotationFrame, SCALE_FRAME_SIZE,
    ScaleFrame, SkeletalAnimationFrames,
};

/// A named animation with keyframes per bone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletalAnimationClip {
    pub name: String,
    pub duration_in_ticks: u32,
    pub ticks_per_second: f64,
    pub frames_per_bone: HashMap<String, SkeletalAnimationFrames>,
}

impl SkeletalAnimationClip {
    /// Clip length in seconds; zero when the tick rate is not positive
    pub fn duration_seconds(&self) -> f64 {
        if self.ticks_per_second > 0.0 {
            self.duration_in_ticks as f64 / self.ticks_per_second
        } else {
            0.0
        }
    }

    /// Bones in the order they are written
    pub fn sorted_bones(&self) -> Vec<(&String, &SkeletalAnimationFrames)> {
        let mut bones: Vec<_> = self.frames_per_bone.iter().collect();
        bones.sort_unstable_by(|a, b| a.0.cmp(b.0));
        bones
    }
}

fn write_frames(frames: &SkeletalAnimationFrames, writer: &mut ByteWriter) {
    writer.write_len(frames.position_frames.len());
    for frame in &frames.position_frames {
        writer.write_f32(frame.time_in_ticks);
        writer.write_vec3(frame.position);
    }
    writer.write_len(frames.rotation_frames.len());
    for frame in &frames.rotation_frames {
        writer.write_f32(frame.time_in_ticks);
        writer.write_quat(frame.rotation);
    }
    writer.write_len(frames.scale_frames.len());
    for frame in &frames.scale_frames {
        writer.write_f32(frame.time_in_ticks);
        writer.write_vec3(frame.scale);
    }
}

fn read_frames(reader: &mut ByteReader<'_>) -> Result<SkeletalAnimationFrames> {
    let count = reader.read_len(POSITION_FRAME_SIZE)?;
    let position_frames = (0..count)
        .map(|_| -> Result<PositionFrame> {
            Ok(PositionFrame {
                time_in_ticks: reader.read_f32()?,
                position: reader.read_vec3()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let count = reader.read_len(ROTATION_FRAME_SIZE)?;
    let rotation_frames = (0..count)
        .map(|_| -> Result<RotationFrame> {
            Ok(RotationFrame {
                time_in_ticks: reader.read_f32()?,
                rotation: reader.read_quat()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let count = reader.read_len(SCALE_FRAME_SIZE)?;
    let scale_frames = (0..count)
        .map(|_| -> Result<ScaleFrame> {
            Ok(ScaleFrame {
                time_in_ticks: reader.read_f32()?,
                scale: reader.read_vec3()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SkeletalAnimationFrames {
        position_frames,
        rotation_frames,
        scale_frames,
    })
}

impl NcaAsset for SkeletalAnimationClip {
    const ASSET_TYPE: AssetType = AssetType::SkeletalAnimationClip;

    fn blob_size(&self) -> u64 {
        blob_size::skeletal_animation_clip(self)
    }

    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_string(&self.name);
        writer.write_u32(self.duration_in_ticks);
        writer.write_f64(self.ticks_per_second);
        writer.write_len(self.frames_per_bone.len());
        for (bone_name, frames) in self.sorted_bones() {
            writer.write_string(bone_name);
            write_frames(frames, writer);
        }
        Ok(())
    }

    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self> {
        let name = reader.read_string()?;
        let duration_in_ticks = reader.read_u32()?;
        let ticks_per_second = reader.read_f64()?;

        // Smallest bone: empty name and three empty tracks
        let min_bone_size = blob_size::string("") + 3 * blob_size::U64;
        let bone_count = reader.read_len(min_bone_size as usize)?;

        let mut frames_per_bone = HashMap::with_capacity(bone_count);
        for _ in 0..bone_count {
            let bone_name = reader.read_string()?;
            let frames = read_frames(reader)?;
            match frames_per_bone.entry(bone_name) {
                Entry::Occupied(entry) => {
                    return Err(NcaError::DuplicateBone(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(frames);
                }
            }
        }

        Ok(Self {
            name,
            duration_in_ticks,
            ticks_per_second,
            frames_per_bone,
        })
    }
}

/// Decode a `SKEL` file image.
pub fn decode_skeletal_animation_clip(bytes: &[u8]) -> Result<(NcaHeader, SkeletalAnimationClip)> {
    super::decode(bytes)
}
