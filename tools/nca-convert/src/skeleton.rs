//! Skin import: bind pose offsets and the bone hierarchy from a glTF skin

use anyhow::{Result, bail};
use glam::Mat4;
use hashbrown::{HashMap, HashSet};
use nca_common::{BoneTree, BonesData, VertexSpaceToBoneSpace};

use crate::geometry::GltfSource;

/// Skin used by the node that instantiates `mesh`, falling back to the
/// document's first skin
pub fn skin_for_mesh<'a>(
    document: &'a gltf::Document,
    mesh: &gltf::Mesh<'_>,
) -> Option<gltf::Skin<'a>> {
    document
        .nodes()
        .filter(|node| node.mesh().is_some_and(|m| m.index() == mesh.index()))
        .find_map(|node| node.skin())
        .or_else(|| document.skins().next())
}

pub fn node_name(node: &gltf::Node<'_>) -> String {
    node.name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node_{}", node.index()))
}

fn local_transform(node: &gltf::Node<'_>) -> Mat4 {
    Mat4::from_cols_array_2d(&node.transform().matrix())
}

/// Offsets in joint order (so vertex joint indices address them) plus the
/// flattened skeleton below the skin's root
pub fn bones_from_skin(source: &GltfSource, skin: &gltf::Skin<'_>) -> Result<BonesData> {
    let joints: Vec<gltf::Node<'_>> = skin.joints().collect();
    if joints.is_empty() {
        bail!("Skin '{}' has no joints", skin.name().unwrap_or("unnamed"));
    }

    let reader = skin.reader(|buffer| Some(&source.buffers[buffer.index()]));
    let inverse_binds: Vec<Mat4> = reader
        .read_inverse_bind_matrices()
        .map(|it| it.map(|m| Mat4::from_cols_array_2d(&m)).collect())
        .unwrap_or_default();

    let offsets = joints
        .iter()
        .enumerate()
        .map(|(i, joint)| VertexSpaceToBoneSpace {
            bone_name: node_name(joint),
            transform: inverse_binds.get(i).copied().unwrap_or(Mat4::IDENTITY),
        })
        .collect();

    let root = match skin.skeleton() {
        Some(root) => root,
        None => joint_root(&source.document, &joints)?,
    };
    let tree = bone_tree(root)?;
    tracing::debug!(
        "Skin '{}': {} joints, {} hierarchy nodes",
        skin.name().unwrap_or("unnamed"),
        joints.len(),
        tree.len()
    );

    Ok(BonesData::from_tree(offsets, Some(&tree))?)
}

/// First joint whose parent is not itself a joint
fn joint_root<'a>(document: &gltf::Document, joints: &[gltf::Node<'a>]) -> Result<gltf::Node<'a>> {
    let mut parents = HashMap::new();
    for node in document.nodes() {
        for child in node.children() {
            parents.insert(child.index(), node.index());
        }
    }
    let joint_set: HashSet<usize> = joints.iter().map(|j| j.index()).collect();

    match joints.iter().find(|joint| {
        parents
            .get(&joint.index())
            .is_none_or(|parent| !joint_set.contains(parent))
    }) {
        Some(root) => Ok(root.clone()),
        None => bail!("Skin joints form a loop with no root"),
    }
}

/// Copy the node subtree under `root` into an arena
pub fn bone_tree(root: gltf::Node<'_>) -> Result<BoneTree> {
    let mut tree = BoneTree::new(node_name(&root), local_transform(&root));
    let mut visited: HashSet<usize> = HashSet::from([root.index()]);
    let mut stack = vec![(0usize, root)];

    while let Some((parent, node)) = stack.pop() {
        for child in node.children() {
            if !visited.insert(child.index()) {
                bail!("Node {} appears twice in the skeleton", child.index());
            }
            let index = tree.add_child(parent, node_name(&child), local_transform(&child))?;
            stack.push((index, child));
        }
    }

    Ok(tree)
}
