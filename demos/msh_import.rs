// Import a legacy Gmsh file and list its trees.
// Run with `RUST_LOG=debug cargo run --example msh_import -- <prefix> [dimension]`;
// without arguments a built-in quad/triangle mesh is read.

use msh_cmesh::prelude::*;

const BUILTIN: &str = r#"
$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
5
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
5 2 0.5 0
$EndNodes
$Elements
4
1 1 2 1 1 1 2
2 3 2 1 1 1 2 3 4
3 2 2 1 1 2 5 3
4 15 2 2 2 5
$EndElements
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let prefix = args.next();
    let dimension = match args.next() {
        Some(raw) => raw.parse::<u8>()?,
        None => 2,
    };

    let cmesh = match prefix {
        Some(prefix) => MshReader::new(ImportOptions::new(dimension)).import(prefix)?,
        None => MshReader::new(ImportOptions::new(dimension)).read(BUILTIN.as_bytes())?,
    };

    println!(
        "[cmesh] dimension {} with {} trees",
        cmesh.dimension(),
        cmesh.num_trees()
    );
    for (cell_type, count) in cmesh.count_by_type() {
        println!("[cmesh]   {count} x {cell_type:?}");
    }
    for (id, tree) in cmesh.iter() {
        println!(
            "{id}: {:?} tags={:?} vertices={:?}",
            tree.cell_type(),
            tree.tags(),
            tree.vertices()
        );
    }

    Ok(())
}
