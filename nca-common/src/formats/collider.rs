//! Collision geometry blobs.
//!
//! # HULL layout
//! ```text
//! 0x00: extents Vec3
//! 0x0C: max_extent f32
//! 0x10: vertex_count u64
//! 0x18: vertices (vertex_count × Vec3)
//! ```
//!
//! # CONC layout
//! ```text
//! 0x00: extents Vec3
//! 0x0C: max_extent f32
//! 0x10: triangle_count u64
//! 0x18: triangles (triangle_count × 3 × Vec3)
//! ```

use glam::Vec3;

use super::blob_size;
use super::header::{AssetType, NcaHeader};
use super::serialization::NcaAsset;
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::Result;

/// One collision triangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.write_vec3(self.a);
        writer.write_vec3(self.b);
        writer.write_vec3(self.c);
    }

    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            a: reader.read_vec3()?,
            b: reader.read_vec3()?,
            c: reader.read_vec3()?,
        })
    }
}

/// Convex hull point cloud.
///
/// The points are stored as given; no hull is computed here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullCollider {
    /// Full size of the axis-aligned bounds (max - min per axis)
    pub extents: Vec3,
    pub max_extent: f32,
    pub vertices: Vec<Vec3>,
}

/// Triangle soup collider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConcaveCollider {
    pub extents: Vec3,
    pub max_extent: f32,
    pub triangles: Vec<Triangle>,
}

impl NcaAsset for HullCollider {
    const ASSET_TYPE: AssetType = AssetType::HullCollider;

    fn blob_size(&self) -> u64 {
        blob_size::hull_collider(self)
    }

    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_vec3(self.extents);
        writer.write_f32(self.max_extent);
        writer.write_len(self.vertices.len());
        for &vertex in &self.vertices {
            writer.write_vec3(vertex);
        }
        Ok(())
    }

    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self> {
        let extents = reader.read_vec3()?;
        let max_extent = reader.read_f32()?;
        let count = reader.read_len(blob_size::VEC3 as usize)?;
        let vertices = (0..count)
            .map(|_| reader.read_vec3())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extents,
            max_extent,
            vertices,
        })
    }
}

impl NcaAsset for ConcaveCollider {
    const ASSET_TYPE: AssetType = AssetType::ConcaveCollider;

    fn blob_size(&self) -> u64 {
        blob_size::concave_collider(self)
    }

    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_vec3(self.extents);
        writer.write_f32(self.max_extent);
        writer.write_len(self.triangles.len());
        for triangle in &self.triangles {
            triangle.write(writer);
        }
        Ok(())
    }

    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self> {
        let extents = reader.read_vec3()?;
        let max_extent = reader.read_f32()?;
        let count = reader.read_len(blob_size::TRIANGLE as usize)?;
        let triangles = (0..count)
            .map(|_| Triangle::read(reader))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extents,
            max_extent,
            triangles,
        })
    }
}

/// Decode a `HULL` file image.
pub fn decode_hull_collider(bytes: &[u8]) -> Result<(NcaHeader, HullCollider)> {
    super::decode(bytes)
}

/// Decode a `CONC` file image.
pub fn decode_concave_collider(bytes: &[u8]) -> Result<(NcaHeader, ConcaveCollider)> {
    super::decode(bytes)
}
