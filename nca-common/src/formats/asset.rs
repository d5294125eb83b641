//! Tagged union over every asset kind, dispatched by header tag.

use super::animation::SkeletalAnimationClip;
use super::audio::AudioClip;
use super::blob_size::compute_blob_size;
use super::collider::{ConcaveCollider, HullCollider};
use super::header::{AssetType, NcaHeader};
use super::mesh::Mesh;
use super::serialization::{self, NcaAsset, decode_blob, framed_blob};
use super::texture::{CubeMap, Texture};
use crate::cursor::ByteReader;
use crate::error::{NcaError, Result};

/// Any decodable asset
#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    AudioClip(AudioClip),
    ConcaveCollider(ConcaveCollider),
    CubeMap(CubeMap),
    HullCollider(HullCollider),
    Mesh(Mesh),
    SkeletalAnimationClip(SkeletalAnimationClip),
    Texture(Texture),
}

macro_rules! asset_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Asset {
                fn from(value: $variant) -> Self {
                    Asset::$variant(value)
                }
            }
        )*
    };
}

asset_from!(
    AudioClip,
    ConcaveCollider,
    CubeMap,
    HullCollider,
    Mesh,
    SkeletalAnimationClip,
    Texture,
);

impl Asset {
    pub fn asset_type(&self) -> AssetType {
        match self {
            Asset::AudioClip(_) => AssetType::AudioClip,
            Asset::ConcaveCollider(_) => AssetType::ConcaveCollider,
            Asset::CubeMap(_) => AssetType::CubeMap,
            Asset::HullCollider(_) => AssetType::HullCollider,
            Asset::Mesh(_) => AssetType::Mesh,
            Asset::SkeletalAnimationClip(_) => AssetType::SkeletalAnimationClip,
            Asset::Texture(_) => AssetType::Texture,
        }
    }

    pub fn blob_size(&self) -> u64 {
        compute_blob_size(self)
    }

    /// Encode into a complete file image
    pub fn encode(&self, asset_id: u64) -> Result<Vec<u8>> {
        match self {
            Asset::AudioClip(a) => serialization::encode(a, asset_id),
            Asset::ConcaveCollider(a) => serialization::encode(a, asset_id),
            Asset::CubeMap(a) => serialization::encode(a, asset_id),
            Asset::HullCollider(a) => serialization::encode(a, asset_id),
            Asset::Mesh(a) => serialization::encode(a, asset_id),
            Asset::SkeletalAnimationClip(a) => serialization::encode(a, asset_id),
            Asset::Texture(a) => serialization::encode(a, asset_id),
        }
    }
}

fn read_as<T: NcaAsset>(header: &NcaHeader, blob: &[u8]) -> Result<T> {
    decode_blob(header, blob, T::read_blob)
}

/// Decode a file image of any kind, choosing the codec from its tag.
///
/// Reserved tags without a codec (`SHAD`) fail with
/// [`NcaError::UnsupportedAssetType`].
pub fn decode_asset(bytes: &[u8]) -> Result<(NcaHeader, Asset)> {
    let mut reader = ByteReader::new(bytes);
    let header = NcaHeader::read(&mut reader)?;
    let asset_type = header.asset_type()?;
    header.validate_compression()?;
    let blob = framed_blob(&header, &mut reader)?;

    let asset = match asset_type {
        AssetType::AudioClip => Asset::AudioClip(read_as(&header, blob)?),
        AssetType::ConcaveCollider => Asset::ConcaveCollider(read_as(&header, blob)?),
        AssetType::CubeMap => Asset::CubeMap(read_as(&header, blob)?),
        AssetType::HullCollider => Asset::HullCollider(read_as(&header, blob)?),
        AssetType::Mesh => Asset::Mesh(read_as(&header, blob)?),
        AssetType::SkeletalAnimationClip => {
            Asset::SkeletalAnimationClip(read_as(&header, blob)?)
        }
        AssetType::Texture => Asset::Texture(read_as(&header, blob)?),
        AssetType::Shader => {
            return Err(NcaError::UnsupportedAssetType(
                asset_type.tag_str().to_string(),
            ));
        }
    };

    Ok((header, asset))
}
