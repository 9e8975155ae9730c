//! Coarse mesh: the container receiving imported trees.
//!
//! Construction is two-phase. A [`CmeshBuilder`] is append-only and accepts
//! trees through the [`TreeSink`] trait; [`CmeshBuilder::commit`] freezes it
//! into a read-only [`Cmesh`] with contiguous tree ids. Dropping a builder
//! discards everything pushed so far, which is how a failed import releases
//! a partially built mesh.

pub mod tree;

pub use tree::{Tree, TreeId};

use crate::mesh_error::{MeshImportError, Section};
use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};

/// Destination for trees emitted by the element reader, in file order.
pub trait TreeSink {
    fn push_tree(&mut self, tree: Tree);
}

impl TreeSink for Vec<Tree> {
    fn push_tree(&mut self, tree: Tree) {
        self.push(tree);
    }
}

/// Append-only coarse mesh under construction.
#[derive(Debug, Clone)]
pub struct CmeshBuilder {
    dimension: u8,
    trees: Vec<Tree>,
}

impl CmeshBuilder {
    pub fn new(dimension: u8) -> Self {
        Self {
            dimension,
            trees: Vec::new(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    /// Number of trees pushed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Freezes the builder into a [`Cmesh`].
    ///
    /// Every tree must have the builder's dimension; ids are assigned in
    /// insertion order starting at zero.
    pub fn commit(self) -> Result<Cmesh, MeshImportError> {
        if u32::try_from(self.trees.len()).is_err() {
            return Err(MeshImportError::CountOverflow {
                section: Section::Elements,
                count: self.trees.len().to_string(),
            });
        }
        if let Some((idx, tree)) = self
            .trees
            .iter()
            .enumerate()
            .find(|(_, tree)| tree.dimension() != self.dimension)
        {
            return Err(MeshImportError::DimensionMismatch {
                tree: TreeId::new(idx as u32),
                expected: self.dimension,
                found: tree.cell_type(),
            });
        }
        Ok(Cmesh {
            dimension: self.dimension,
            trees: self.trees,
        })
    }
}

impl TreeSink for CmeshBuilder {
    fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }
}

/// Committed coarse mesh of a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cmesh {
    dimension: u8,
    trees: Vec<Tree>,
}

impl Cmesh {
    /// Topological dimension shared by all trees.
    #[inline]
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    #[inline]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Returns the tree with id `id`, if any.
    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.trees.get(id.index())
    }

    /// Trees in id order.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// `(TreeId, &Tree)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TreeId, &Tree)> + '_ {
        self.trees
            .iter()
            .enumerate()
            .map(|(idx, tree)| (TreeId::new(idx as u32), tree))
    }

    /// Number of trees of each cell type.
    pub fn count_by_type(&self) -> Vec<(CellType, usize)> {
        CellType::ALL
            .into_iter()
            .map(|ty| (ty, self.trees.iter().filter(|t| t.cell_type() == ty).count()))
            .filter(|&(_, n)| n > 0)
            .collect()
    }

    /// Consumes the mesh and returns its trees.
    pub fn into_trees(self) -> Vec<Tree> {
        self.trees
    }
}
