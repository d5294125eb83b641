//! Keyframe types for skeletal animation clips

use glam::{Quat, Vec3};

use crate::formats::blob_size;

/// Translation key (16 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionFrame {
    pub time_in_ticks: f32,
    pub position: Vec3,
}

/// Rotation key (20 bytes), quaternion stored as [x, y, z, w]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationFrame {
    pub time_in_ticks: f32,
    pub rotation: Quat,
}

impl Default for RotationFrame {
    fn default() -> Self {
        Self {
            time_in_ticks: 0.0,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Scale key (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFrame {
    pub time_in_ticks: f32,
    pub scale: Vec3,
}

impl Default for ScaleFrame {
    fn default() -> Self {
        Self {
            time_in_ticks: 0.0,
            scale: Vec3::ONE,
        }
    }
}

/// All keyframes for one bone. Each track is independent and sorted by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletalAnimationFrames {
    pub position_frames: Vec<PositionFrame>,
    pub rotation_frames: Vec<RotationFrame>,
    pub scale_frames: Vec<ScaleFrame>,
}

impl SkeletalAnimationFrames {
    pub fn is_empty(&self) -> bool {
        self.position_frames.is_empty()
            && self.rotation_frames.is_empty()
            && self.scale_frames.is_empty()
    }

    /// Total number of keys across the three tracks
    pub fn key_count(&self) -> usize {
        self.position_frames.len() + self.rotation_frames.len() + self.scale_frames.len()
    }
}

/// Size of each key on disk
pub const POSITION_FRAME_SIZE: usize = blob_size::POSITION_FRAME as usize;
pub const ROTATION_FRAME_SIZE: usize = blob_size::ROTATION_FRAME as usize;
pub const SCALE_FRAME_SIZE: usize = blob_size::SCALE_FRAME as usize;
