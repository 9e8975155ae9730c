#![allow(dead_code)]
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `contents` to `<dir>/<name>.msh` and returns the path prefix
/// `<dir>/<name>` expected by `import_mesh`.
pub fn write_msh(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let prefix = dir.join(name);
    fs::write(dir.join(format!("{name}.msh")), contents).unwrap();
    prefix
}

/// Small text builder for `.msh` fixtures.
#[derive(Default)]
pub struct MshText {
    nodes: Vec<(i64, [f64; 3])>,
    elements: Vec<(i64, Vec<i64>, Vec<i64>)>,
}

impl MshText {
    pub fn node(mut self, index: i64, xyz: [f64; 3]) -> Self {
        self.nodes.push((index, xyz));
        self
    }

    pub fn element(mut self, code: i64, tags: &[i64], nodes: &[i64]) -> Self {
        self.elements.push((code, tags.to_vec(), nodes.to_vec()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::from("$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Nodes\n");
        writeln!(out, "{}", self.nodes.len()).unwrap();
        for (index, [x, y, z]) in &self.nodes {
            writeln!(out, "{index} {x:?} {y:?} {z:?}").unwrap();
        }
        out.push_str("$EndNodes\n$Elements\n");
        writeln!(out, "{}", self.elements.len()).unwrap();
        for (serial, (code, tags, nodes)) in self.elements.iter().enumerate() {
            write!(out, "{} {code} {}", serial + 1, tags.len()).unwrap();
            for v in tags.iter().chain(nodes) {
                write!(out, " {v}").unwrap();
            }
            out.push('\n');
        }
        out.push_str("$EndElements\n");
        out
    }
}

/// Unit cube corners labelled 1..=8 in Gmsh hexahedron order.
pub fn unit_cube() -> MshText {
    MshText::default()
        .node(1, [0.0, 0.0, 0.0])
        .node(2, [1.0, 0.0, 0.0])
        .node(3, [1.0, 1.0, 0.0])
        .node(4, [0.0, 1.0, 0.0])
        .node(5, [0.0, 0.0, 1.0])
        .node(6, [1.0, 0.0, 1.0])
        .node(7, [1.0, 1.0, 1.0])
        .node(8, [0.0, 1.0, 1.0])
}
