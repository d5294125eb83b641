//! NCA asset container format
//!
//! This crate provides the binary codec shared between:
//! - `nca-convert` (asset pipeline, writes `.nca` files)
//! - engine-side loaders (read `.nca` files straight into memory)
//!
//! # Modules
//!
//! - [`cursor`] - Bounds-checked little-endian byte reader/writer
//! - [`formats`] - Header framing, blob sizes and per-asset codecs
//! - [`identity`] - FNV-1a asset ids derived from output file names
//! - [`error`] - Error taxonomy for every codec operation

pub mod cursor;
pub mod error;
pub mod formats;
pub mod identity;

pub use cursor::{ByteReader, ByteWriter};
pub use error::{NcaError, Result};
pub use identity::{asset_id_for_path, fnv1a};

// Re-export commonly used format items
pub use formats::{
    // Codecs
    Asset,
    // Header
    AssetType,
    AudioClip,
    BoneNode,
    BoneSpaceToParentSpace,
    BoneTree,
    BonesData,
    COMPRESSION_NONE,
    ConcaveCollider,
    CubeMap,
    HierarchyView,
    HullCollider,
    Mesh,
    MeshVertex,
    NCA_EXTENSION,
    NcaAsset,
    NcaHeader,
    PositionFrame,
    Rigging,
    RotationFrame,
    ScaleFrame,
    SkeletalAnimationClip,
    SkeletalAnimationFrames,
    Texture,
    Triangle,
    VertexSpaceToBoneSpace,
    compute_blob_size,
    decode,
    decode_asset,
    decode_audio_clip,
    decode_concave_collider,
    decode_cube_map,
    decode_hull_collider,
    decode_mesh,
    decode_skeletal_animation_clip,
    decode_texture,
    encode,
    // Hierarchy
    flatten_hierarchy,
    reconstruct_hierarchy,
};
