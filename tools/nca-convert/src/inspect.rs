//! Human and JSON summaries of `.nca` files

use anyhow::{Context, Result};
use nca_common::{Asset, AssetType, NcaHeader, decode_asset};
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub file: String,
    pub header: HeaderInfo,
    /// Absent for reserved kinds without a codec
    pub data: Option<AssetSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderInfo {
    pub type_tag: String,
    pub compression: String,
    pub asset_id: u64,
    pub blob_size: u64,
}

impl From<&NcaHeader> for HeaderInfo {
    fn from(header: &NcaHeader) -> Self {
        Self {
            type_tag: header.type_tag_str(),
            compression: header.compression_tag_str(),
            asset_id: header.asset_id,
            blob_size: header.blob_size,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AssetSummary {
    AudioClip {
        samples_per_channel: u64,
    },
    ConcaveCollider {
        extents: [f32; 3],
        max_extent: f32,
        triangle_count: usize,
    },
    CubeMap {
        face_side_length: u32,
    },
    HullCollider {
        extents: [f32; 3],
        max_extent: f32,
        vertex_count: usize,
    },
    Mesh {
        extents: [f32; 3],
        max_extent: f32,
        vertex_count: usize,
        index_count: usize,
        vertex_to_bone_count: usize,
        bone_to_parent_count: usize,
    },
    SkeletalAnimation {
        name: String,
        duration_in_ticks: u32,
        ticks_per_second: f64,
        bone_count: usize,
    },
    Texture {
        width: u32,
        height: u32,
    },
}

impl From<&Asset> for AssetSummary {
    fn from(asset: &Asset) -> Self {
        match asset {
            Asset::AudioClip(a) => Self::AudioClip {
                samples_per_channel: a.samples_per_channel,
            },
            Asset::ConcaveCollider(a) => Self::ConcaveCollider {
                extents: a.extents.to_array(),
                max_extent: a.max_extent,
                triangle_count: a.triangles.len(),
            },
            Asset::CubeMap(a) => Self::CubeMap {
                face_side_length: a.face_side_length,
            },
            Asset::HullCollider(a) => Self::HullCollider {
                extents: a.extents.to_array(),
                max_extent: a.max_extent,
                vertex_count: a.vertices.len(),
            },
            Asset::Mesh(a) => {
                let bones = a.rigging.bones();
                Self::Mesh {
                    extents: a.extents.to_array(),
                    max_extent: a.max_extent,
                    vertex_count: a.vertices.len(),
                    index_count: a.indices.len(),
                    vertex_to_bone_count: bones.map_or(0, |b| b.vertex_space_to_bone_space.len()),
                    bone_to_parent_count: bones.map_or(0, |b| b.bone_space_to_parent_space.len()),
                }
            }
            Asset::SkeletalAnimationClip(a) => Self::SkeletalAnimation {
                name: a.name.clone(),
                duration_in_ticks: a.duration_in_ticks,
                ticks_per_second: a.ticks_per_second,
                bone_count: a.frames_per_bone.len(),
            },
            Asset::Texture(a) => Self::Texture {
                width: a.width,
                height: a.height,
            },
        }
    }
}

/// Read and fully decode one file
pub fn inspect_file(path: &Path) -> Result<Report> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let header = NcaHeader::from_bytes(&bytes)
        .with_context(|| format!("Failed to read header of {:?}", path))?;

    let data = if header.asset_type().ok() == Some(AssetType::Shader) {
        None
    } else {
        let (_, asset) =
            decode_asset(&bytes).with_context(|| format!("Failed to decode {:?}", path))?;
        Some(AssetSummary::from(&asset))
    };

    Ok(Report {
        file: path.display().to_string(),
        header: HeaderInfo::from(&header),
        data,
    })
}

fn write_extents(f: &mut fmt::Formatter<'_>, extents: &[f32; 3], max_extent: f32) -> fmt::Result {
    writeln!(
        f,
        "  extents      {}, {}, {}",
        extents[0], extents[1], extents[2]
    )?;
    writeln!(f, "  max extent   {}", max_extent)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File {}", self.file)?;
        writeln!(f, "Header")?;
        writeln!(f, "  type         {}", self.header.type_tag)?;
        writeln!(f, "  compression  {}", self.header.compression)?;
        writeln!(f, "  id           {:#018x}", self.header.asset_id)?;
        writeln!(f, "  size         {}", self.header.blob_size)?;

        let Some(data) = &self.data else {
            return writeln!(f, "Data\n  no codec for this type");
        };
        writeln!(f, "Data")?;
        match data {
            AssetSummary::AudioClip {
                samples_per_channel,
            } => writeln!(f, "  samples      {}", samples_per_channel),
            AssetSummary::ConcaveCollider {
                extents,
                max_extent,
                triangle_count,
            } => {
                write_extents(f, extents, *max_extent)?;
                writeln!(f, "  triangles    {}", triangle_count)
            }
            AssetSummary::CubeMap { face_side_length } => {
                writeln!(f, "  face side    {}", face_side_length)
            }
            AssetSummary::HullCollider {
                extents,
                max_extent,
                vertex_count,
            } => {
                write_extents(f, extents, *max_extent)?;
                writeln!(f, "  vertices     {}", vertex_count)
            }
            AssetSummary::Mesh {
                extents,
                max_extent,
                vertex_count,
                index_count,
                vertex_to_bone_count,
                bone_to_parent_count,
            } => {
                write_extents(f, extents, *max_extent)?;
                writeln!(f, "  vertices     {}", vertex_count)?;
                writeln!(f, "  indices      {}", index_count)?;
                writeln!(f, "  bone offsets {}", vertex_to_bone_count)?;
                writeln!(f, "  hierarchy    {}", bone_to_parent_count)
            }
            AssetSummary::SkeletalAnimation {
                name,
                duration_in_ticks,
                ticks_per_second,
                bone_count,
            } => {
                writeln!(f, "  name         {}", name)?;
                writeln!(f, "  duration     {} ticks", duration_in_ticks)?;
                writeln!(f, "  tick rate    {}", ticks_per_second)?;
                writeln!(f, "  bones        {}", bone_count)
            }
            AssetSummary::Texture { width, height } => {
                writeln!(f, "  size         {}x{}", width, height)
            }
        }
    }
}
