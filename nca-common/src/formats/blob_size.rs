//! Exact blob sizes per asset kind.
//!
//! These must agree byte for byte with the encoders; `encode` debug-asserts
//! that they do.

use super::animation::{SkeletalAnimationClip, SkeletalAnimationFrames};
use super::asset::Asset;
use super::audio::AudioClip;
use super::collider::{ConcaveCollider, HullCollider};
use super::mesh::{BonesData, Mesh, Rigging};
use super::texture::{CubeMap, Texture};

pub const U8: u64 = 1;
pub const U32: u64 = 4;
pub const U64: u64 = 8;
pub const F32: u64 = 4;
pub const F64: u64 = 8;
pub const VEC2: u64 = 2 * F32;
pub const VEC3: u64 = 3 * F32;
pub const VEC4: u64 = 4 * F32;
pub const QUAT: u64 = VEC4;
pub const MAT4: u64 = 16 * F32;

/// Three corner positions
pub const TRIANGLE: u64 = 3 * VEC3;

/// position, normal, uv, tangent, bitangent, weights, bone ids
pub const MESH_VERTEX: u64 = VEC3 + VEC3 + VEC2 + VEC3 + VEC3 + VEC4 + 4 * U32;

/// time + translation
pub const POSITION_FRAME: u64 = F32 + VEC3;
/// time + rotation
pub const ROTATION_FRAME: u64 = F32 + QUAT;
/// time + scale
pub const SCALE_FRAME: u64 = F32 + VEC3;

/// Shared prefix of every geometry blob: extents + max extent
const EXTENTS: u64 = VEC3 + F32;

/// Length prefix plus UTF-8 bytes
pub fn string(value: &str) -> u64 {
    U64 + value.len() as u64
}

/// Saturates for counts no real clip can hold
pub fn audio_clip(clip: &AudioClip) -> u64 {
    clip.samples_per_channel
        .saturating_mul(2 * F64)
        .saturating_add(U64)
}

pub fn hull_collider(hull: &HullCollider) -> u64 {
    EXTENTS + U64 + hull.vertices.len() as u64 * VEC3
}

pub fn concave_collider(concave: &ConcaveCollider) -> u64 {
    EXTENTS + U64 + concave.triangles.len() as u64 * TRIANGLE
}

pub fn texture(texture: &Texture) -> u64 {
    2 * U32 + texture.pixel_data.len() as u64
}

pub fn cube_map(cube: &CubeMap) -> u64 {
    U32 + cube.pixel_data.len() as u64
}

pub fn mesh(mesh: &Mesh) -> u64 {
    EXTENTS
        + 2 * U64
        + mesh.vertices.len() as u64 * MESH_VERTEX
        + mesh.indices.len() as u64 * U32
        + U8
        + rigging(&mesh.rigging)
}

/// Rigging payload after the presence flag; zero when unrigged
pub fn rigging(rigging: &Rigging) -> u64 {
    match rigging {
        Rigging::Unrigged => 0,
        Rigging::Rigged(bones) => bones_data(bones),
    }
}

pub fn bones_data(bones: &BonesData) -> u64 {
    let offsets: u64 = bones
        .vertex_space_to_bone_space
        .iter()
        .map(|entry| string(&entry.bone_name) + MAT4)
        .sum();
    let hierarchy: u64 = bones
        .bone_space_to_parent_space
        .iter()
        .map(|entry| string(&entry.bone_name) + MAT4 + 2 * U32)
        .sum();
    U64 + offsets + U64 + hierarchy
}

pub fn skeletal_animation_clip(clip: &SkeletalAnimationClip) -> u64 {
    let bones: u64 = clip
        .frames_per_bone
        .iter()
        .map(|(name, frames)| string(name) + bone_frames(frames))
        .sum();
    string(&clip.name) + U32 + F64 + U64 + bones
}

pub fn bone_frames(frames: &SkeletalAnimationFrames) -> u64 {
    U64 + frames.position_frames.len() as u64 * POSITION_FRAME
        + U64
        + frames.rotation_frames.len() as u64 * ROTATION_FRAME
        + U64
        + frames.scale_frames.len() as u64 * SCALE_FRAME
}

/// Blob size for any asset kind.
pub fn compute_blob_size(asset: &Asset) -> u64 {
    match asset {
        Asset::AudioClip(clip) => audio_clip(clip),
        Asset::ConcaveCollider(concave) => concave_collider(concave),
        Asset::CubeMap(cube) => cube_map(cube),
        Asset::HullCollider(hull) => hull_collider(hull),
        Asset::Mesh(m) => mesh(m),
        Asset::SkeletalAnimationClip(clip) => skeletal_animation_clip(clip),
        Asset::Texture(t) => texture(t),
    }
}
