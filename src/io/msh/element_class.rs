//! Gmsh element-type codes and vertex orderings.
//!
//! Only first-order elements are recognised. Gmsh lists the corners of
//! tensor-product cells by walking around their faces; trees use the
//! canonical corner order of the coarse mesh instead, so quads, hexahedra and
//! pyramids are reordered. Simplices and prisms keep the file order.

use crate::topology::cell_type::CellType;
use static_assertions::const_assert;

/// Highest first-order Gmsh element code (the point element).
pub const MAX_ELEMENT_CODE: i64 = 15;

const VERTEX_ORDER: [usize; 1] = [0];
const SEGMENT_ORDER: [usize; 2] = [0, 1];
const TRIANGLE_ORDER: [usize; 3] = [0, 1, 2];
const QUADRILATERAL_ORDER: [usize; 4] = [0, 1, 3, 2];
const TETRAHEDRON_ORDER: [usize; 4] = [0, 1, 2, 3];
const HEXAHEDRON_ORDER: [usize; 8] = [0, 1, 5, 4, 2, 3, 7, 6];
const PRISM_ORDER: [usize; 6] = [0, 1, 2, 3, 4, 5];
const PYRAMID_ORDER: [usize; 5] = [0, 1, 3, 2, 4];

const fn is_permutation(order: &[usize]) -> bool {
    let mut seen = [false; 8];
    if order.len() > seen.len() {
        return false;
    }
    let mut i = 0;
    while i < order.len() {
        let target = order[i];
        if target >= order.len() || seen[target] {
            return false;
        }
        seen[target] = true;
        i += 1;
    }
    true
}

const_assert!(is_permutation(&VERTEX_ORDER));
const_assert!(is_permutation(&SEGMENT_ORDER));
const_assert!(is_permutation(&TRIANGLE_ORDER));
const_assert!(is_permutation(&QUADRILATERAL_ORDER));
const_assert!(is_permutation(&TETRAHEDRON_ORDER));
const_assert!(is_permutation(&HEXAHEDRON_ORDER));
const_assert!(is_permutation(&PRISM_ORDER));
const_assert!(is_permutation(&PYRAMID_ORDER));

/// Maps a Gmsh element-type code to its cell type.
///
/// Second-order and higher elements (codes 8..=14, 16 and above) and
/// anything non-positive are unsupported.
pub const fn classify(code: i64) -> Option<CellType> {
    match code {
        1 => Some(CellType::Segment),
        2 => Some(CellType::Triangle),
        3 => Some(CellType::Quadrilateral),
        4 => Some(CellType::Tetrahedron),
        5 => Some(CellType::Hexahedron),
        6 => Some(CellType::Prism),
        7 => Some(CellType::Pyramid),
        MAX_ELEMENT_CODE => Some(CellType::Vertex),
        _ => None,
    }
}

/// Gmsh code of a cell type; inverse of [`classify`].
pub const fn element_code(cell_type: CellType) -> i64 {
    match cell_type {
        CellType::Segment => 1,
        CellType::Triangle => 2,
        CellType::Quadrilateral => 3,
        CellType::Tetrahedron => 4,
        CellType::Hexahedron => 5,
        CellType::Prism => 6,
        CellType::Pyramid => 7,
        CellType::Vertex => MAX_ELEMENT_CODE,
    }
}

/// Canonical position of every file-order vertex, indexed by file position.
pub const fn vertex_order(cell_type: CellType) -> &'static [usize] {
    match cell_type {
        CellType::Vertex => &VERTEX_ORDER,
        CellType::Segment => &SEGMENT_ORDER,
        CellType::Triangle => &TRIANGLE_ORDER,
        CellType::Quadrilateral => &QUADRILATERAL_ORDER,
        CellType::Tetrahedron => &TETRAHEDRON_ORDER,
        CellType::Hexahedron => &HEXAHEDRON_ORDER,
        CellType::Prism => &PRISM_ORDER,
        CellType::Pyramid => &PYRAMID_ORDER,
    }
}

/// Canonical position of the vertex listed at `file_position`, or `None` if
/// the cell has no such vertex.
pub fn permute(cell_type: CellType, file_position: usize) -> Option<usize> {
    vertex_order(cell_type).get(file_position).copied()
}
