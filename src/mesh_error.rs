//! MeshImportError: unified error type for the `.msh` importer.
//!
//! Every failure of an import is terminal: the format has no
//! resynchronisation point, so one bad record invalidates the whole file.
//! Variants carry enough context (section, record ordinal, physical line,
//! offending token) to locate the problem in the input.

use crate::cmesh::TreeId;
use crate::topology::cell_type::CellType;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The two sections of a `.msh` file consumed by the importer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Nodes,
    Elements,
}

impl Section {
    /// Marker token opening the section.
    pub const fn marker(self) -> &'static str {
        match self {
            Section::Nodes => "$Nodes",
            Section::Elements => "$Elements",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Errors produced while importing a mesh.
#[derive(Debug, Error)]
pub enum MeshImportError {
    /// The mesh file could not be opened.
    #[error("could not open mesh file `{}`: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Read failure on an already opened stream.
    #[error("I/O error while reading mesh: {0}")]
    Io(#[from] io::Error),
    /// Section marker never found, or its count line is unusable.
    #[error("malformed {section} header (line {line}): {reason}")]
    MalformedHeader {
        section: Section,
        line: usize,
        reason: String,
    },
    /// Declared count does not fit the local index width; `count` is the
    /// offending token as written.
    #[error("{section} count {count} exceeds the local index range")]
    CountOverflow { section: Section, count: String },
    /// A node or element record is missing fields or has unparsable ones.
    #[error("malformed {section} record #{ordinal} (line {line}): {reason}")]
    MalformedRecord {
        section: Section,
        ordinal: usize,
        line: usize,
        reason: String,
    },
    /// Element type code outside the supported first-order set.
    #[error("element record #{ordinal}: element type {code} is not supported")]
    UnsupportedElementType { code: i64, ordinal: usize },
    /// Element references a node index absent from `$Nodes`.
    #[error("element record #{ordinal} references undeclared node {node}")]
    DanglingNodeReference { node: i64, ordinal: usize },
    /// Node index declared twice in `$Nodes`.
    #[error("node record #{ordinal}: node index {index} is declared more than once")]
    DuplicateNode { index: i64, ordinal: usize },
    /// Requested target dimension is not one of 0, 1, 2, 3.
    #[error("target dimension must be in 0..=3, got {0}")]
    InvalidDimension(u8),
    /// `$MeshFormat` header describes a file this importer cannot read.
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),
    /// A tree handed to a coarse mesh does not have the mesh dimension.
    #[error("tree {tree} is a {found:?} but the coarse mesh has dimension {expected}")]
    DimensionMismatch {
        tree: TreeId,
        expected: u8,
        found: CellType,
    },
}
