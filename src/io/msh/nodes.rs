//! `$Nodes` section: node records and the node index built from them.
//!
//! Node identifiers in a `.msh` file are arbitrary integers, neither
//! contiguous nor sorted. The [`NodeTable`] maps them to coordinates for the
//! element pass and is dropped once the import is done.

use super::header::LocalIndex;
use super::scanner::LineScanner;
use crate::mesh_error::{MeshImportError, Section};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use itertools::Itertools;
use std::io::BufRead;

/// Upper bound on the capacity reserved up front from a header count.
const MAX_PREALLOCATED_NODES: usize = 1 << 20;

/// A node record: external index and coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshNode {
    pub index: i64,
    pub coordinates: [f64; 3],
}

/// Index of node coordinates keyed by external node index.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
    nodes: HashMap<i64, [f64; 3]>,
}

impl NodeTable {
    /// Creates a table sized for `expected` nodes.
    ///
    /// The reservation is clamped so a bogus header count cannot trigger a
    /// huge allocation; the table still grows past it as needed.
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(expected.min(MAX_PREALLOCATED_NODES)),
        }
    }

    /// Inserts a node. Returns `false`, leaving the table unchanged, if the
    /// index is already present.
    pub fn insert(&mut self, node: MeshNode) -> bool {
        match self.nodes.entry(node.index) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node.coordinates);
                true
            }
        }
    }

    /// Looks up a node by external index.
    pub fn get(&self, index: i64) -> Option<MeshNode> {
        self.nodes.get(&index).map(|&coordinates| MeshNode { index, coordinates })
    }

    /// Coordinates of node `index`.
    #[inline]
    pub fn coordinates(&self, index: i64) -> Option<&[f64; 3]> {
        self.nodes.get(&index)
    }

    #[inline]
    pub fn contains(&self, index: i64) -> bool {
        self.nodes.contains_key(&index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = MeshNode> + '_ {
        self.nodes
            .iter()
            .map(|(&index, &coordinates)| MeshNode { index, coordinates })
    }
}

/// Parses one `index x y z` record.
fn parse_node(text: &str) -> Result<MeshNode, String> {
    let Some((index, x, y, z)) = text.split_whitespace().next_tuple() else {
        return Err(format!("expected `index x y z`, got `{}`", text.trim()));
    };
    let index = index
        .parse::<i64>()
        .map_err(|_| format!("invalid node index `{index}`"))?;
    let mut coordinates = [0.0; 3];
    for (slot, raw) in coordinates.iter_mut().zip([x, y, z]) {
        *slot = raw
            .parse::<f64>()
            .map_err(|_| format!("invalid coordinate `{raw}`"))?;
    }
    Ok(MeshNode { index, coordinates })
}

/// Reads `count` node records following the count line.
pub fn read_nodes<R: BufRead>(
    scanner: &mut LineScanner<R>,
    count: LocalIndex,
) -> Result<NodeTable, MeshImportError> {
    let mut table = NodeTable::with_capacity(count as usize);
    for ordinal in 1..=count as usize {
        let Some(line) = scanner.next_line()? else {
            return Err(MeshImportError::MalformedRecord {
                section: Section::Nodes,
                ordinal,
                line: scanner.line_number(),
                reason: format!("end of file after {} of {count} nodes", ordinal - 1),
            });
        };
        let node = parse_node(line.text).map_err(|reason| MeshImportError::MalformedRecord {
            section: Section::Nodes,
            ordinal,
            line: line.number,
            reason,
        })?;
        if !table.insert(node) {
            return Err(MeshImportError::DuplicateNode {
                index: node.index,
                ordinal,
            });
        }
    }
    log::trace!("read {} nodes", table.len());
    Ok(table)
}
