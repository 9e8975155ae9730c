//! # msh-cmesh
//!
//! msh-cmesh reads legacy ASCII Gmsh `.msh` files and turns them into a
//! coarse mesh: a dimension-filtered, ordered collection of first-order cells
//! ("trees"), each tagged with its [`CellType`](topology::cell_type::CellType)
//! and carrying its corner coordinates in canonical vertex order.
//!
//! ## Features
//! - Streaming, line-oriented parser tolerant of comments, blank lines and
//!   unknown sections
//! - Hash-indexed node table for arbitrary, non-contiguous node identifiers
//! - Static translation of Gmsh element codes and vertex orderings
//! - Fail-fast error reporting with record ordinals and line numbers; no
//!   partial mesh is ever returned
//!
//! ## Usage
//! ```no_run
//! use msh_cmesh::prelude::*;
//!
//! let cmesh = import_mesh("square", 2)?;
//! for (id, tree) in cmesh.iter() {
//!     println!("{id}: {:?} {:?}", tree.cell_type(), tree.vertices());
//! }
//! # Ok::<(), MeshImportError>(())
//! ```
//!
//! ## Logging
//! The crate logs through the [`log`] facade: phase transitions at `trace`,
//! import summaries and failures at `debug`, empty results at `warn`.
//! Install any `log` backend (e.g. `env_logger`) to see them.

pub mod cmesh;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::cmesh::{Cmesh, CmeshBuilder, Tree, TreeId, TreeSink};
    pub use crate::io::CmeshReader;
    pub use crate::io::msh::{ImportOptions, MshReader, import_mesh, import_mesh_with_options, read_msh};
    pub use crate::mesh_error::MeshImportError;
    pub use crate::topology::cell_type::CellType;
}
