//! Mesh blob (tag `MESH`)
//!
//! # Layout
//! ```text
//! 0x00: extents Vec3
//! 0x0C: max_extent f32
//! 0x10: vertex_count u64
//! 0x18: index_count u64
//! 0x20: vertices (vertex_count × 88 bytes)
//! var:  indices  (index_count × u32)
//! var:  has_rigging u8
//! var:  rigging (only when has_rigging != 0)
//! ```
//!
//! # Rigging layout
//! ```text
//! offset_count u64
//!   offset_count × { bone_name string, transform Mat4 }
//! hierarchy_count u64
//!   hierarchy_count × { bone_name string, transform Mat4,
//!                       child_count u32, first_child_index u32 }
//! ```

use glam::{Mat4, Vec2, Vec3, Vec4};

use super::blob_size;
use super::header::{AssetType, NcaHeader};
use super::hierarchy::{
    BoneSpaceToParentSpace, BoneTree, HierarchyView, flatten_hierarchy, reconstruct_hierarchy,
    validate_hierarchy,
};
use super::serialization::NcaAsset;
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::Result;

/// Skinned vertex (88 bytes on disk)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    /// Influence of each of `bone_ids`
    pub bone_weights: Vec4,
    pub bone_ids: [u32; 4],
}

impl MeshVertex {
    fn write(&self, writer: &mut ByteWriter) {
        writer.write_vec3(self.position);
        writer.write_vec3(self.normal);
        writer.write_vec2(self.uv);
        writer.write_vec3(self.tangent);
        writer.write_vec3(self.bitangent);
        writer.write_vec4(self.bone_weights);
        for id in self.bone_ids {
            writer.write_u32(id);
        }
    }

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            position: reader.read_vec3()?,
            normal: reader.read_vec3()?,
            uv: reader.read_vec2()?,
            tangent: reader.read_vec3()?,
            bitangent: reader.read_vec3()?,
            bone_weights: reader.read_vec4()?,
            bone_ids: [
                reader.read_u32()?,
                reader.read_u32()?,
                reader.read_u32()?,
                reader.read_u32()?,
            ],
        })
    }
}

/// Bind pose offset: mesh space into one bone's local space
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSpaceToBoneSpace {
    pub bone_name: String,
    pub transform: Mat4,
}

/// Skinning data carried by a rigged mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BonesData {
    /// One entry per bone that influences vertices
    pub vertex_space_to_bone_space: Vec<VertexSpaceToBoneSpace>,
    /// Flattened skeleton, root at index 0
    pub bone_space_to_parent_space: Vec<BoneSpaceToParentSpace>,
}

impl BonesData {
    /// Flatten a skeleton tree alongside its bind pose offsets
    pub fn from_tree(
        offsets: Vec<VertexSpaceToBoneSpace>,
        skeleton: Option<&BoneTree>,
    ) -> Result<Self> {
        Ok(Self {
            vertex_space_to_bone_space: offsets,
            bone_space_to_parent_space: flatten_hierarchy(skeleton)?,
        })
    }

    /// Rebuild the skeleton tree; `None` when there is no hierarchy
    pub fn skeleton(&self) -> Result<Option<BoneTree>> {
        reconstruct_hierarchy(&self.bone_space_to_parent_space)
    }

    /// Navigate the flattened skeleton in place
    pub fn hierarchy(&self) -> Result<HierarchyView<'_>> {
        HierarchyView::new(&self.bone_space_to_parent_space)
    }

    /// Index of a bone's bind pose offset, which is the id vertices use
    pub fn bone_id(&self, name: &str) -> Option<usize> {
        self.vertex_space_to_bone_space
            .iter()
            .position(|offset| offset.bone_name == name)
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.write_len(self.vertex_space_to_bone_space.len());
        for offset in &self.vertex_space_to_bone_space {
            writer.write_string(&offset.bone_name);
            writer.write_mat4(&offset.transform);
        }
        writer.write_len(self.bone_space_to_parent_space.len());
        for entry in &self.bone_space_to_parent_space {
            entry.write(writer);
        }
    }

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let offset_count = reader.read_len((blob_size::U64 + blob_size::MAT4) as usize)?;
        let vertex_space_to_bone_space = (0..offset_count)
            .map(|_| -> Result<VertexSpaceToBoneSpace> {
                Ok(VertexSpaceToBoneSpace {
                    bone_name: reader.read_string()?,
                    transform: reader.read_mat4()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let hierarchy_count = reader.read_len(BoneSpaceToParentSpace::MIN_SIZE as usize)?;
        let bone_space_to_parent_space = (0..hierarchy_count)
            .map(|_| BoneSpaceToParentSpace::read(reader))
            .collect::<Result<Vec<_>>>()?;
        HierarchyView::new(&bone_space_to_parent_space)?;

        Ok(Self {
            vertex_space_to_bone_space,
            bone_space_to_parent_space,
        })
    }
}

/// Whether a mesh carries skinning data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Rigging {
    #[default]
    Unrigged,
    Rigged(BonesData),
}

impl Rigging {
    /// `Unrigged` when there are no offsets and no skeleton
    pub fn from_bones(bones: BonesData) -> Self {
        if bones.vertex_space_to_bone_space.is_empty()
            && bones.bone_space_to_parent_space.is_empty()
        {
            Rigging::Unrigged
        } else {
            Rigging::Rigged(bones)
        }
    }

    pub fn is_rigged(&self) -> bool {
        matches!(self, Rigging::Rigged(_))
    }

    pub fn bones(&self) -> Option<&BonesData> {
        match self {
            Rigging::Rigged(bones) => Some(bones),
            Rigging::Unrigged => None,
        }
    }
}

/// Triangle mesh with optional skinning data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub extents: Vec3,
    pub max_extent: f32,
    pub vertices: Vec<MeshVertex>,
    /// Triangle list, three per face
    pub indices: Vec<u32>,
    pub rigging: Rigging,
}

impl NcaAsset for Mesh {
    const ASSET_TYPE: AssetType = AssetType::Mesh;

    /// A rigged mesh must carry a hierarchy the decoder will accept
    fn validate(&self) -> Result<()> {
        match &self.rigging {
            Rigging::Rigged(bones) => validate_hierarchy(&bones.bone_space_to_parent_space),
            Rigging::Unrigged => Ok(()),
        }
    }

    fn blob_size(&self) -> u64 {
        blob_size::mesh(self)
    }

    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_vec3(self.extents);
        writer.write_f32(self.max_extent);
        writer.write_len(self.vertices.len());
        writer.write_len(self.indices.len());
        for vertex in &self.vertices {
            vertex.write(writer);
        }
        for &index in &self.indices {
            writer.write_u32(index);
        }

        writer.write_bool(self.rigging.is_rigged());
        if let Rigging::Rigged(bones) = &self.rigging {
            bones.write(writer);
        }
        Ok(())
    }

    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self> {
        let extents = reader.read_vec3()?;
        let max_extent = reader.read_f32()?;
        let vertex_count = reader.read_len(blob_size::MESH_VERTEX as usize)?;
        let index_count = reader.read_len(blob_size::U32 as usize)?;

        let vertices = (0..vertex_count)
            .map(|_| MeshVertex::read(reader))
            .collect::<Result<Vec<_>>>()?;
        let indices = (0..index_count)
            .map(|_| reader.read_u32())
            .collect::<Result<Vec<_>>>()?;

        let rigging = if reader.read_bool()? {
            Rigging::Rigged(BonesData::read(reader)?)
        } else {
            Rigging::Unrigged
        };

        Ok(Self {
            extents,
            max_extent,
            vertices,
            indices,
            rigging,
        })
    }
}

/// Decode a `MESH` file image.
pub fn decode_mesh(bytes: &[u8]) -> Result<(NcaHeader, Mesh)> {
    super::decode(bytes)
}
