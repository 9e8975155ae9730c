//! Topological vocabulary shared by the coarse mesh and the readers.

pub mod cell_type;
