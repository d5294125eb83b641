//! Geometry import from glTF/GLB: meshes, hull and concave colliders

use anyhow::{Context, Result, bail};
use glam::{Vec2, Vec3, Vec4};
use gltf::mesh::Mode;
use nca_common::{ConcaveCollider, HullCollider, Mesh, MeshVertex, Rigging, Triangle};
use std::path::Path;

use crate::analysis::{Sanitize, extents, max_extent};
use crate::error::ImportError;
use crate::skeleton;

/// A loaded glTF document with its binary buffers
pub struct GltfSource {
    pub document: gltf::Document,
    pub buffers: Vec<gltf::buffer::Data>,
}

impl GltfSource {
    pub fn open(input: &Path) -> Result<Self> {
        let (document, buffers, _images) =
            gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;
        Ok(Self { document, buffers })
    }

    /// Named mesh, or the first one
    pub fn mesh(&self, input: &Path, name: Option<&str>) -> Result<gltf::Mesh<'_>> {
        match name {
            Some(name) => self
                .document
                .meshes()
                .find(|m| m.name() == Some(name))
                .ok_or_else(|| ImportError::missing("mesh", name, input).into()),
            None => self
                .document
                .meshes()
                .next()
                .with_context(|| format!("No meshes found in {:?}", input)),
        }
    }
}

/// Raw triangulated attributes of one primitive
#[derive(Debug, Default)]
pub struct Primitive {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// xyz tangent, w handedness
    pub tangents: Vec<Vec4>,
    pub joints: Vec<[u32; 4]>,
    pub weights: Vec<Vec4>,
    pub indices: Vec<u32>,
}

impl Primitive {
    /// Read the first primitive of `mesh`. Missing optional attributes are
    /// left empty.
    pub fn read(mesh: &gltf::Mesh<'_>, buffers: &[gltf::buffer::Data]) -> Result<Self> {
        let primitive = mesh
            .primitives()
            .next()
            .context("No primitives found in mesh")?;
        if mesh.primitives().len() > 1 {
            tracing::warn!(
                "Mesh '{}' has {} primitives; only the first is converted",
                mesh.name().unwrap_or("unnamed"),
                mesh.primitives().len()
            );
        }
        if primitive.mode() != Mode::Triangles {
            bail!(
                "Primitive mode {:?} is not supported; export triangles",
                primitive.mode()
            );
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("No positions in mesh")?
            .map(Vec3::from)
            .collect();
        if positions.is_empty() {
            bail!("Mesh has no vertices");
        }

        let normals = reader
            .read_normals()
            .map(|it| it.map(Vec3::from).collect())
            .unwrap_or_default();
        let uvs = reader
            .read_tex_coords(0)
            .map(|it| it.into_f32().map(Vec2::from).collect())
            .unwrap_or_default();
        let tangents = reader
            .read_tangents()
            .map(|it| it.map(Vec4::from).collect())
            .unwrap_or_default();
        let joints = reader
            .read_joints(0)
            .map(|it| it.into_u16().map(|j| j.map(u32::from)).collect())
            .unwrap_or_default();
        let weights = reader
            .read_weights(0)
            .map(|it| it.into_f32().map(Vec4::from).collect())
            .unwrap_or_default();
        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        if indices.len() % 3 != 0 {
            bail!("Index count {} is not a multiple of 3", indices.len());
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            bail!(
                "Index {} out of range for {} vertices",
                bad,
                positions.len()
            );
        }

        Ok(Self {
            positions,
            normals,
            uvs,
            tangents,
            joints,
            weights,
            indices,
        })
    }

    /// Combine attributes into engine vertices; bitangent = normal × tangent × w
    pub fn vertices(&self) -> Vec<MeshVertex> {
        (0..self.positions.len())
            .map(|i| {
                let normal = self.normals.get(i).copied().unwrap_or(Vec3::ZERO);
                let tangent = self.tangents.get(i).copied().unwrap_or(Vec4::ZERO);
                MeshVertex {
                    position: self.positions[i],
                    normal,
                    uv: self.uvs.get(i).copied().unwrap_or(Vec2::ZERO),
                    tangent: tangent.truncate(),
                    bitangent: normal.cross(tangent.truncate()) * tangent.w,
                    bone_weights: self.weights.get(i).copied().unwrap_or(Vec4::ZERO),
                    bone_ids: self.joints.get(i).copied().unwrap_or([0; 4]),
                }
            })
            .collect()
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        self.indices
            .chunks_exact(3)
            .map(|t| {
                Triangle::new(
                    self.positions[t[0] as usize],
                    self.positions[t[1] as usize],
                    self.positions[t[2] as usize],
                )
            })
            .collect()
    }
}

fn warn_sanitized(input: &Path, count: usize) {
    if count > 0 {
        tracing::warn!(
            "Bad values detected in {:?}: {} values have been set to 0",
            input,
            count
        );
    }
}

/// Load a renderable mesh, with rigging when the mesh is skinned
pub fn load_mesh(input: &Path, name: Option<&str>) -> Result<Mesh> {
    let source = GltfSource::open(input)?;
    let mesh = source.mesh(input, name)?;
    let primitive = Primitive::read(&mesh, &source.buffers)?;

    let mut vertices = primitive.vertices();
    warn_sanitized(input, vertices.sanitize());

    let rigging = match skeleton::skin_for_mesh(&source.document, &mesh) {
        Some(skin) if !primitive.joints.is_empty() => {
            Rigging::from_bones(skeleton::bones_from_skin(&source, &skin)?)
        }
        _ => Rigging::Unrigged,
    };

    tracing::debug!(
        "Mesh {:?}: {} vertices, {} indices, rigged={}",
        input,
        vertices.len(),
        primitive.indices.len(),
        rigging.is_rigged()
    );

    Ok(Mesh {
        extents: extents(&vertices[..]),
        max_extent: max_extent(&vertices[..]),
        vertices,
        indices: primitive.indices,
        rigging,
    })
}

/// Load the vertex cloud of a mesh as a convex hull collider
pub fn load_hull_collider(input: &Path, name: Option<&str>) -> Result<HullCollider> {
    let source = GltfSource::open(input)?;
    let primitive = Primitive::read(&source.mesh(input, name)?, &source.buffers)?;

    let mut vertices = primitive.positions;
    warn_sanitized(input, vertices.sanitize());

    Ok(HullCollider {
        extents: extents(&vertices[..]),
        max_extent: max_extent(&vertices[..]),
        vertices,
    })
}

/// Load the triangle list of a mesh as a concave collider
pub fn load_concave_collider(input: &Path, name: Option<&str>) -> Result<ConcaveCollider> {
    let source = GltfSource::open(input)?;
    let primitive = Primitive::read(&source.mesh(input, name)?, &source.buffers)?;

    let mut triangles = primitive.triangles();
    warn_sanitized(input, triangles.sanitize());

    Ok(ConcaveCollider {
        extents: extents(&triangles[..]),
        max_extent: max_extent(&triangles[..]),
        triangles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Primitive {
        Primitive {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            tangents: vec![Vec4::new(1.0, 0.0, 0.0, -1.0); 4],
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        }
    }

    #[test]
    fn test_vertices_fill_missing_attributes() {
        let vertices = quad().vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2].uv, Vec2::ZERO);
        assert_eq!(vertices[2].bone_ids, [0; 4]);
        assert_eq!(vertices[2].tangent, Vec3::X);
    }

    #[test]
    fn test_bitangent_respects_handedness() {
        let vertices = quad().vertices();
        // Z × X = Y, flipped by w = -1
        assert_eq!(vertices[0].bitangent, Vec3::NEG_Y);
    }

    #[test]
    fn test_triangles_from_indices() {
        let triangles = quad().triangles();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[1].c, Vec3::new(0.0, 1.0, 0.0));
    }
}
