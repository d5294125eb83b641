//! Bone hierarchy flattening.
//!
//! A skeleton is an arbitrary-arity tree. On disk it is stored as a flat
//! breadth-first array where each entry carries `child_count` and
//! `first_child_index`; siblings are always contiguous, so the array can be
//! walked without parent pointers.
//!
//! In memory the tree is an arena ([`BoneTree`]) of nodes that refer to their
//! children by index. Node 0 is the root.

use std::collections::VecDeque;

use glam::Mat4;

use super::blob_size;
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{NcaError, Result};


/// One flattened hierarchy entry as stored on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneSpaceToParentSpace {
    pub bone_name: String,
    /// Bone local space to parent space
    pub transform: Mat4,
    pub child_count: u32,
    /// Only meaningful when `child_count > 0`
    pub first_child_index: u32,
}

impl BoneSpaceToParentSpace {
    /// Range of child entries in the flattened array
    pub fn children(&self) -> std::ops::Range<usize> {
        let first = self.first_child_index as usize;
        first..first + self.child_count as usize
    }

    pub(crate) fn write(&self, writer: &mut ByteWriter) {
        writer.write_string(&self.bone_name);
        writer.write_mat4(&self.transform);
        writer.write_u32(self.child_count);
        writer.write_u32(self.first_child_index);
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            bone_name: reader.read_string()?,
            transform: reader.read_mat4()?,
            child_count: reader.read_u32()?,
            first_child_index: reader.read_u32()?,
        })
    }

    /// Smallest possible encoded entry (empty name)
    pub(crate) const MIN_SIZE: u64 = blob_size::U64 + blob_size::MAT4 + 2 * blob_size::U32;
}

/// Node in a [`BoneTree`] arena
#[derive(Debug, Clone, PartialEq)]
pub struct BoneNode {
    pub name: String,
    pub transform: Mat4,
    /// Indices into the owning tree, in order
    pub children: Vec<usize>,
}

impl BoneNode {
    pub fn new(name: impl Into<String>, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            transform,
            children: Vec::new(),
        }
    }
}

/// Skeleton tree stored as an index arena. The root is node 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneTree {
    nodes: Vec<BoneNode>,
}

impl BoneTree {
    /// Tree holding only a root
    pub fn new(root_name: impl Into<String>, transform: Mat4) -> Self {
        Self {
            nodes: vec![BoneNode::new(root_name, transform)],
        }
    }

    /// Wrap an existing arena as-is.
    ///
    /// The links are not checked here; [`flatten_hierarchy`] rejects dangling
    /// indices and cycles.
    pub fn from_nodes(nodes: Vec<BoneNode>) -> Self {
        Self { nodes }
    }

    /// Append a child under `parent`, returning the new node's index.
    pub fn add_child(
        &mut self,
        parent: usize,
        name: impl Into<String>,
        transform: Mat4,
    ) -> Result<usize> {
        let index = self.nodes.len();
        let node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| NcaError::MalformedHierarchy {
                index: parent,
                reason: "parent does not exist".to_string(),
            })?;
        node.children.push(index);
        self.nodes.push(BoneNode::new(name, transform));
        Ok(index)
    }

    pub fn root(&self) -> Option<&BoneNode> {
        self.nodes.first()
    }

    pub fn node(&self, index: usize) -> Option<&BoneNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[BoneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `index` in order; empty for unknown indices
    pub fn children(&self, index: usize) -> impl Iterator<Item = (usize, &BoneNode)> + '_ {
        self.nodes
            .get(index)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&child| self.nodes.get(child).map(|node| (child, node)))
    }

    /// Index of the first node with the given name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.name == name)
    }
}

/// Flatten a tree into breadth-first order.
///
/// When a node is emitted its children have not been queued yet, so they will
/// land right after every node already waiting in the queue: at
/// `output.len() + queue.len()` once the node itself is in the output.
///
/// `None` and an empty arena both flatten to an empty array. A node reached
/// twice fails with [`NcaError::CyclicHierarchy`]; a child index outside the
/// arena fails with [`NcaError::MalformedHierarchy`].
pub fn flatten_hierarchy(tree: Option<&BoneTree>) -> Result<Vec<BoneSpaceToParentSpace>> {
    let Some(tree) = tree.filter(|tree| !tree.is_empty()) else {
        return Ok(Vec::new());
    };

    let nodes = tree.nodes();
    let mut visited = vec![false; nodes.len()];
    let mut queue = VecDeque::from([0usize]);
    let mut output = Vec::with_capacity(nodes.len());

    while let Some(index) = queue.pop_front() {
        if std::mem::replace(&mut visited[index], true) {
            return Err(NcaError::CyclicHierarchy { node: index });
        }
        let node = &nodes[index];

        let first_child_index = output.len() + 1 + queue.len();
        output.push(BoneSpaceToParentSpace {
            bone_name: node.name.clone(),
            transform: node.transform,
            child_count: to_u32(node.children.len(), index)?,
            first_child_index: to_u32(first_child_index, index)?,
        });

        for &child in &node.children {
            if child >= nodes.len() {
                return Err(NcaError::MalformedHierarchy {
                    index,
                    reason: format!("child index {child} is outside the tree"),
                });
            }
            queue.push_back(child);
        }
    }

    Ok(output)
}

fn to_u32(value: usize, index: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| NcaError::MalformedHierarchy {
        index,
        reason: format!("{value} does not fit in 32 bits"),
    })
}

/// Check that a flattened array describes exactly one tree rooted at 0:
/// child ranges are in bounds and follow their parent, no entry is claimed
/// by two parents, and every entry is reachable.
pub fn validate_hierarchy(entries: &[BoneSpaceToParentSpace]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let mut claimed = vec![false; entries.len()];
    claimed[0] = true;

    for (index, entry) in entries.iter().enumerate() {
        if entry.child_count == 0 {
            continue;
        }
        let children = entry.children();
        if children.start <= index {
            return Err(NcaError::MalformedHierarchy {
                index,
                reason: format!(
                    "first child {} does not come after its parent",
                    children.start
                ),
            });
        }
        if children.end > entries.len() {
            return Err(NcaError::MalformedHierarchy {
                index,
                reason: format!(
                    "{} children starting at {} run past the {} entries",
                    entry.child_count,
                    children.start,
                    entries.len()
                ),
            });
        }
        for child in children {
            if std::mem::replace(&mut claimed[child], true) {
                return Err(NcaError::MalformedHierarchy {
                    index: child,
                    reason: "entry has more than one parent".to_string(),
                });
            }
        }
    }

    match claimed.iter().position(|&c| !c) {
        Some(index) => Err(NcaError::MalformedHierarchy {
            index,
            reason: "entry is not reachable from the root".to_string(),
        }),
        None => Ok(()),
    }
}

/// Rebuild the tree from its flattened form.
///
/// An empty array means "no skeleton" and yields `Ok(None)`.
pub fn reconstruct_hierarchy(entries: &[BoneSpaceToParentSpace]) -> Result<Option<BoneTree>> {
    if entries.is_empty() {
        return Ok(None);
    }
    validate_hierarchy(entries)?;

    let nodes = entries
        .iter()
        .map(|entry| BoneNode {
            name: entry.bone_name.clone(),
            transform: entry.transform,
            children: if entry.child_count == 0 {
                Vec::new()
            } else {
                entry.children().collect()
            },
        })
        .collect();

    Ok(Some(BoneTree::from_nodes(nodes)))
}

/// Read-only navigation over a validated flattened hierarchy, without
/// building a tree.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyView<'a> {
    entries: &'a [BoneSpaceToParentSpace],
}

impl<'a> HierarchyView<'a> {
    pub fn new(entries: &'a [BoneSpaceToParentSpace]) -> Result<Self> {
        validate_hierarchy(entries)?;
        Ok(Self { entries })
    }

    pub fn root(&self) -> Option<&'a BoneSpaceToParentSpace> {
        self.entries.first()
    }

    pub fn get(&self, index: usize) -> Option<&'a BoneSpaceToParentSpace> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Child entries of `index`, contiguous in the array
    pub fn children(&self, index: usize) -> &'a [BoneSpaceToParentSpace] {
        match self.entries.get(index) {
            Some(entry) if entry.child_count > 0 => &self.entries[entry.children()],
            _ => &[],
        }
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.bone_name == name)
    }

    /// Parent of `index`, found by scanning earlier entries
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.entries[..index.min(self.entries.len())]
            .iter()
            .position(|entry| entry.child_count > 0 && entry.children().contains(&index))
    }
}
