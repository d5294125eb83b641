//! Source file -> asset value, per asset kind

use anyhow::{Result, bail};
use nca_common::{Asset, AssetType};
use std::path::Path;

use crate::{animation, audio, geometry, texture};

/// Import `source` as the given kind. `internal_name` picks a mesh or
/// animation inside a glTF file.
pub fn import_asset(kind: AssetType, source: &Path, internal_name: Option<&str>) -> Result<Asset> {
    if internal_name.is_some()
        && !matches!(
            kind,
            AssetType::Mesh
                | AssetType::HullCollider
                | AssetType::ConcaveCollider
                | AssetType::SkeletalAnimationClip
        )
    {
        tracing::warn!("internal name is ignored for {} assets", kind);
    }

    let asset: Asset = match kind {
        AssetType::AudioClip => audio::load_audio_clip(source)?.into(),
        AssetType::ConcaveCollider => {
            geometry::load_concave_collider(source, internal_name)?.into()
        }
        AssetType::CubeMap => texture::load_cube_map(source)?.into(),
        AssetType::HullCollider => geometry::load_hull_collider(source, internal_name)?.into(),
        AssetType::Mesh => geometry::load_mesh(source, internal_name)?.into(),
        AssetType::SkeletalAnimationClip => {
            animation::load_animation(source, internal_name)?.into()
        }
        AssetType::Texture => texture::load_texture(source)?.into(),
        AssetType::Shader => bail!("{} assets cannot be converted", kind),
    };
    Ok(asset)
}
