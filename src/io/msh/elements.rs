//! `$Elements` section: element records to trees.
//!
//! Each record reads `serial type tag-count tag* node*`. Records whose class
//! has the target dimension become [`Tree`]s with their corners resolved
//! through the [`NodeTable`] and reordered into canonical order; the others
//! are lower-dimensional boundary entities and are skipped.

use super::element_class::{classify, vertex_order};
use super::header::LocalIndex;
use super::nodes::NodeTable;
use super::scanner::LineScanner;
use crate::cmesh::{Tree, TreeSink};
use crate::mesh_error::{MeshImportError, Section};
use crate::topology::cell_type::CellType;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::str::SplitWhitespace;

/// Outcome of the element pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementSummary {
    /// Records read.
    pub read: usize,
    /// Trees handed to the sink.
    pub emitted: usize,
    /// Records skipped for having another dimension, per cell type.
    pub skipped: BTreeMap<CellType, usize>,
}

impl ElementSummary {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// One element record of the target dimension, before node resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingElement {
    pub serial: i64,
    /// Physical line the record was read from.
    pub line: usize,
    pub cell_type: CellType,
    pub tags: Vec<i64>,
    pub node_indices: Vec<i64>,
}

impl PendingElement {
    /// Resolves node indices and reorders the corners into a tree.
    pub fn resolve(mut self, nodes: &NodeTable, ordinal: usize) -> Result<Tree, MeshImportError> {
        let order = vertex_order(self.cell_type);
        let arity_error = || MeshImportError::MalformedRecord {
            section: Section::Elements,
            ordinal,
            line: self.line,
            reason: format!(
                "element {} lists {} nodes for a {:?}",
                self.serial,
                self.node_indices.len(),
                self.cell_type
            ),
        };
        if self.node_indices.len() != order.len() {
            return Err(arity_error());
        }
        let mut vertices = vec![[0.0; 3]; order.len()];
        for (&node, &canonical) in self.node_indices.iter().zip(order) {
            let coordinates = nodes
                .coordinates(node)
                .ok_or(MeshImportError::DanglingNodeReference { node, ordinal })?;
            vertices[canonical] = *coordinates;
        }
        let tags = std::mem::take(&mut self.tags);
        Tree::with_tags(self.cell_type, vertices, tags).ok_or_else(arity_error)
    }
}

/// Record header read before the class is known.
struct RecordHead {
    serial: i64,
    code: i64,
    tag_count: usize,
}

fn next_int(tokens: &mut SplitWhitespace<'_>, what: &str) -> Result<i64, String> {
    let raw = tokens.next().ok_or_else(|| format!("missing {what}"))?;
    raw.parse::<i64>()
        .map_err(|_| format!("invalid {what} `{raw}`"))
}

fn parse_head(tokens: &mut SplitWhitespace<'_>) -> Result<RecordHead, String> {
    let serial = next_int(tokens, "element number")?;
    let code = next_int(tokens, "element type")?;
    let tag_count = next_int(tokens, "tag count")?;
    let tag_count =
        usize::try_from(tag_count).map_err(|_| format!("negative tag count {tag_count}"))?;
    Ok(RecordHead {
        serial,
        code,
        tag_count,
    })
}

fn parse_body(
    tokens: &mut SplitWhitespace<'_>,
    head: RecordHead,
    cell_type: CellType,
    line: usize,
) -> Result<PendingElement, String> {
    let tags = (0..head.tag_count)
        .map(|_| next_int(tokens, "tag"))
        .collect::<Result<Vec<_>, _>>()?;
    let node_indices = (0..cell_type.num_vertices())
        .map(|i| {
            next_int(tokens, "node index").map_err(|reason| {
                format!("{reason} ({i} of {} for a {cell_type:?})", cell_type.num_vertices())
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PendingElement {
        serial: head.serial,
        line,
        cell_type,
        tags,
        node_indices,
    })
}

/// Reads `count` element records and pushes a tree to `sink` for every
/// record whose class has dimension `dimension`, in file order.
///
/// Aborts on the first malformed record, unsupported element type or
/// undeclared node; trees already pushed are left in the sink.
pub fn read_elements<R: BufRead, S: TreeSink + ?Sized>(
    scanner: &mut LineScanner<R>,
    count: LocalIndex,
    nodes: &NodeTable,
    dimension: u8,
    sink: &mut S,
) -> Result<ElementSummary, MeshImportError> {
    let mut summary = ElementSummary::default();
    for ordinal in 1..=count as usize {
        let Some(line) = scanner.next_line()? else {
            return Err(MeshImportError::MalformedRecord {
                section: Section::Elements,
                ordinal,
                line: scanner.line_number(),
                reason: format!("end of file after {} of {count} elements", ordinal - 1),
            });
        };
        let malformed = |reason: String| MeshImportError::MalformedRecord {
            section: Section::Elements,
            ordinal,
            line: line.number,
            reason,
        };
        let mut tokens = line.text.split_whitespace();
        let head = parse_head(&mut tokens).map_err(malformed)?;
        let cell_type = classify(head.code).ok_or(MeshImportError::UnsupportedElementType {
            code: head.code,
            ordinal,
        })?;
        summary.read += 1;
        if cell_type.dimension() != dimension {
            *summary.skipped.entry(cell_type).or_default() += 1;
            continue;
        }
        let pending = parse_body(&mut tokens, head, cell_type, line.number).map_err(malformed)?;
        sink.push_tree(pending.resolve(nodes, ordinal)?);
        summary.emitted += 1;
    }
    Ok(summary)
}
