//! Mesh readers producing coarse meshes.
//!
//! Readers share the [`CmeshReader`] trait so callers can load a [`Cmesh`]
//! from any buffered source without knowing the file format.

pub mod msh;

use crate::cmesh::Cmesh;
use crate::mesh_error::MeshImportError;
use std::io::BufRead;

/// Trait for readers that build a committed coarse mesh from a stream.
pub trait CmeshReader {
    /// Parse a coarse mesh from a reader.
    fn read<R: BufRead>(&self, reader: R) -> Result<Cmesh, MeshImportError>;
}
