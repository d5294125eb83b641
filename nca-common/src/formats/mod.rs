//! NCA binary formats
//!
//! Every file is a 24-byte [`NcaHeader`] followed by a blob whose layout
//! depends on the header's type tag. All values are little-endian.
//!
//! | Tag    | Type                      |
//! |--------|---------------------------|
//! | `CLIP` | [`AudioClip`]             |
//! | `CONC` | [`ConcaveCollider`]       |
//! | `CUBE` | [`CubeMap`]               |
//! | `HULL` | [`HullCollider`]          |
//! | `MESH` | [`Mesh`]                  |
//! | `SHAD` | reserved, no codec        |
//! | `SKEL` | [`SkeletalAnimationClip`] |
//! | `TEXT` | [`Texture`]               |

pub mod animation;
mod asset;
mod audio;
pub mod blob_size;
mod collider;
mod header;
pub mod hierarchy;
mod mesh;
mod serialization;
mod texture;

pub use animation::{
    PositionFrame, RotationFrame, ScaleFrame, SkeletalAnimationClip, SkeletalAnimationFrames,
    decode_skeletal_animation_clip,
};
pub use asset::{Asset, decode_asset};
pub use audio::{AudioClip, decode_audio_clip};
pub use blob_size::compute_blob_size;
pub use collider::{
    ConcaveCollider, HullCollider, Triangle, decode_concave_collider, decode_hull_collider,
};
pub use header::{
    AssetType, COMPRESSION_NONE, NCA_EXTENSION, NcaHeader, encode_tag, tag_to_string,
};
pub use hierarchy::{
    BoneNode, BoneSpaceToParentSpace, BoneTree, HierarchyView, flatten_hierarchy,
    reconstruct_hierarchy, validate_hierarchy,
};
pub use mesh::{BonesData, Mesh, MeshVertex, Rigging, VertexSpaceToBoneSpace, decode_mesh};
pub use serialization::{NcaAsset, decode, encode};
pub use texture::{
    BYTES_PER_PIXEL, CUBE_FACE_COUNT, CubeMap, Texture, decode_cube_map, decode_texture,
};
