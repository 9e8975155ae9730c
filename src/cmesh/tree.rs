//! `Tree` and `TreeId`: the output unit of an import.
//!
//! A tree is one first-order cell of the coarse mesh: a [`CellType`] plus its
//! corner coordinates in canonical vertex order. Trees are identified inside a
//! committed [`Cmesh`](super::Cmesh) by a contiguous, zero-based [`TreeId`].

use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based index of a tree in a coarse mesh.
///
/// Ids are assigned contiguously in insertion order when the mesh is
/// committed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TreeId(u32);

impl TreeId {
    /// Creates a `TreeId` from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        TreeId(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the raw index as `usize`, for slice indexing.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TreeId").field(&self.0).finish()
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One geometric cell of the coarse mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    cell_type: CellType,
    vertices: Vec<[f64; 3]>,
    tags: Vec<i64>,
}

impl Tree {
    /// Builds a tree, returning `None` if the vertex count does not match the
    /// cell type.
    pub fn new(cell_type: CellType, vertices: Vec<[f64; 3]>) -> Option<Self> {
        Self::with_tags(cell_type, vertices, Vec::new())
    }

    /// Like [`Tree::new`] but keeps the element's integer tags.
    pub fn with_tags(cell_type: CellType, vertices: Vec<[f64; 3]>, tags: Vec<i64>) -> Option<Self> {
        (vertices.len() == cell_type.num_vertices()).then_some(Self {
            cell_type,
            vertices,
            tags,
        })
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn dimension(&self) -> u8 {
        self.cell_type.dimension()
    }

    /// Corner coordinates in canonical vertex order.
    #[inline]
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    /// Raw element tags in file order.
    #[inline]
    pub fn tags(&self) -> &[i64] {
        &self.tags
    }

    /// Physical group tag (first tag), if the element had one.
    pub fn physical_tag(&self) -> Option<i64> {
        self.tags.first().copied()
    }

    /// Elementary entity tag (second tag), if the element had one.
    pub fn entity_tag(&self) -> Option<i64> {
        self.tags.get(1).copied()
    }
}
