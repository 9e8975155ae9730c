//! Gmsh `.msh` importer producing a coarse mesh of trees.
//!
//! # Supported format
//! - ASCII `.msh` of the 2.x family (`$Nodes` / `$Elements` blocks).
//! - Element types: 1 (line), 2 (triangle), 3 (quad), 4 (tet), 5 (hex),
//!   6 (prism), 7 (pyramid), 15 (point).
//! - `#` comment lines and blank lines anywhere; unknown sections are skipped.
//!
//! # Limitations
//! - Binary files and `.msh` v4.x are not supported.
//! - Higher-order elements are rejected.
//! - Only elements of the requested dimension become trees; the rest are
//!   skipped.
//! - Partitioned input is not supported: every caller reads the whole file.
//!
//! # Example
//! ```no_run
//! use msh_cmesh::io::msh::import_mesh;
//!
//! // Reads `meshes/cube.msh` and keeps the 3D elements.
//! let cmesh = import_mesh("meshes/cube", 3)?;
//! println!("{} trees", cmesh.num_trees());
//! # Ok::<(), msh_cmesh::mesh_error::MeshImportError>(())
//! ```

pub mod element_class;
pub mod elements;
pub mod header;
pub mod nodes;
pub mod scanner;

pub use element_class::{classify, permute, vertex_order};
pub use elements::{ElementSummary, PendingElement, read_elements};
pub use header::{LocalIndex, MeshFormat, locate_section, read_count};
pub use nodes::{MeshNode, NodeTable, read_nodes};
pub use scanner::{Line, LineScanner};

use crate::cmesh::{Cmesh, CmeshBuilder};
use crate::io::CmeshReader;
use crate::mesh_error::{MeshImportError, Section};
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File extension appended to the path prefix by default.
pub const DEFAULT_EXTENSION: &str = "msh";

/// Options for [`import_mesh_with_options`] and [`read_msh`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    /// Dimension of the elements to keep (0..=3).
    pub dimension: u8,
    /// Extension appended to the path prefix, without the dot.
    pub extension: String,
    /// Validate a `$MeshFormat` header when one is present.
    pub check_format: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dimension: 3,
            extension: DEFAULT_EXTENSION.to_string(),
            check_format: true,
        }
    }
}

impl ImportOptions {
    /// Default options keeping elements of `dimension`.
    pub fn new(dimension: u8) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_check_format(mut self, check_format: bool) -> Self {
        self.check_format = check_format;
        self
    }

    fn validate(&self) -> Result<(), MeshImportError> {
        if self.dimension > 3 {
            return Err(MeshImportError::InvalidDimension(self.dimension));
        }
        Ok(())
    }

    /// Full path of the file read for `prefix`: the prefix with `.extension`
    /// appended (an existing extension is kept).
    pub fn file_path(&self, prefix: impl AsRef<Path>) -> PathBuf {
        let mut path = OsString::from(prefix.as_ref().as_os_str());
        if !self.extension.is_empty() {
            path.push(".");
            path.push(&self.extension);
        }
        PathBuf::from(path)
    }
}

/// Progress of an import.
///
/// `Failed` is absorbing and reachable from every phase before `Committed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportPhase {
    Start,
    NodeSectionLocated,
    NodesRead,
    ElementSectionLocated,
    ElementsRead,
    Committed,
    Failed,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportPhase::Start => "start",
            ImportPhase::NodeSectionLocated => "node section located",
            ImportPhase::NodesRead => "nodes read",
            ImportPhase::ElementSectionLocated => "element section located",
            ImportPhase::ElementsRead => "elements read",
            ImportPhase::Committed => "committed",
            ImportPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// `.msh` reader bound to a set of [`ImportOptions`].
#[derive(Clone, Debug, Default)]
pub struct MshReader {
    options: ImportOptions,
}

impl MshReader {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Imports `<prefix>.<extension>`.
    pub fn import(&self, prefix: impl AsRef<Path>) -> Result<Cmesh, MeshImportError> {
        import_mesh_with_options(prefix, &self.options)
    }
}

impl CmeshReader for MshReader {
    fn read<R: BufRead>(&self, reader: R) -> Result<Cmesh, MeshImportError> {
        read_msh(reader, &self.options)
    }
}

/// Imports `<prefix>.msh`, keeping the elements of `dimension`.
pub fn import_mesh(prefix: impl AsRef<Path>, dimension: u8) -> Result<Cmesh, MeshImportError> {
    import_mesh_with_options(prefix, &ImportOptions::new(dimension))
}

/// Imports `<prefix>.<extension>` with explicit options.
pub fn import_mesh_with_options(
    prefix: impl AsRef<Path>,
    options: &ImportOptions,
) -> Result<Cmesh, MeshImportError> {
    options.validate()?;
    let path = options.file_path(prefix);
    log::debug!("opening mesh file {}", path.display());
    let file = File::open(&path).map_err(|source| MeshImportError::FileNotFound {
        path: path.clone(),
        source,
    })?;
    read_msh(BufReader::new(file), options).inspect_err(|err| {
        log::debug!("import of {} failed: {err}", path.display());
    })
}

/// Runs the import pipeline over an already opened reader.
///
/// On error every intermediate (node table, partially filled coarse mesh,
/// the reader itself) is dropped before returning.
pub fn read_msh<R: BufRead>(reader: R, options: &ImportOptions) -> Result<Cmesh, MeshImportError> {
    options.validate()?;
    Import::new(reader).execute(options)
}

struct Import<R> {
    scanner: LineScanner<R>,
    phase: ImportPhase,
}

impl<R: BufRead> Import<R> {
    fn new(reader: R) -> Self {
        Self {
            scanner: LineScanner::new(reader),
            phase: ImportPhase::Start,
        }
    }

    fn advance(&mut self, phase: ImportPhase) {
        log::trace!("msh import: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Runs the pipeline, moving to [`ImportPhase::Failed`] on any error.
    fn execute(&mut self, options: &ImportOptions) -> Result<Cmesh, MeshImportError> {
        match self.run(options) {
            Ok(cmesh) => Ok(cmesh),
            Err(err) => {
                log::debug!(
                    "msh import failed after phase `{}` (line {}): {err}",
                    self.phase,
                    self.scanner.line_number()
                );
                self.advance(ImportPhase::Failed);
                Err(err)
            }
        }
    }

    fn run(&mut self, options: &ImportOptions) -> Result<Cmesh, MeshImportError> {
        let mut builder = CmeshBuilder::new(options.dimension);

        let format_line = locate_section(&mut self.scanner, Section::Nodes)?;
        if options.check_format {
            if let Some(line) = format_line {
                MeshFormat::parse(&line)?.validate()?;
            }
        }
        self.advance(ImportPhase::NodeSectionLocated);

        let node_count = read_count(&mut self.scanner, Section::Nodes)?;
        let nodes = read_nodes(&mut self.scanner, node_count)?;
        self.advance(ImportPhase::NodesRead);

        locate_section(&mut self.scanner, Section::Elements)?;
        self.advance(ImportPhase::ElementSectionLocated);

        let element_count = read_count(&mut self.scanner, Section::Elements)?;
        let summary = read_elements(
            &mut self.scanner,
            element_count,
            &nodes,
            options.dimension,
            &mut builder,
        )?;
        drop(nodes);
        self.advance(ImportPhase::ElementsRead);
        log::debug!(
            "read {node_count} nodes and {} elements: {} trees of dimension {}, {} skipped {:?}",
            summary.read,
            summary.emitted,
            options.dimension,
            summary.skipped_total(),
            summary.skipped,
        );
        if builder.is_empty() {
            log::warn!(
                "mesh has no elements of dimension {}; the coarse mesh is empty",
                options.dimension
            );
        }

        let cmesh = builder.commit()?;
        self.advance(ImportPhase::Committed);
        Ok(cmesh)
    }
}
