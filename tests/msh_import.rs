mod util;

use msh_cmesh::cmesh::TreeId;
use msh_cmesh::io::msh::{ImportOptions, import_mesh, import_mesh_with_options};
use msh_cmesh::mesh_error::{MeshImportError, Section};
use msh_cmesh::topology::cell_type::CellType;
use tempfile::tempdir;
use util::{MshText, unit_cube, write_msh};

const MIXED_SURFACE_VOLUME: &str = r#"# exported by hand
$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
2
2 1 "wall"
3 2 "fluid"
$EndPhysicalNames

$Nodes
5
10 0 0 0
20 1 0 0
# apex
50 0 0 1
30 0 1 0
40 1 1 0
$EndNodes
$Elements
5
1 2 2 1 7 10 20 30
2 4 2 2 1 10 20 30 50

3 2 2 1 7 20 40 30
4 1 2 0 3 10 20
5 4 2 2 1 20 40 30 50
$EndElements
"#;

#[test]
fn triangles_only_with_dimension_two() {
    let dir = tempdir().unwrap();
    let prefix = write_msh(dir.path(), "mixed", MIXED_SURFACE_VOLUME);

    let cmesh = import_mesh(&prefix, 2).expect("import");
    assert_eq!(cmesh.dimension(), 2);
    assert_eq!(cmesh.num_trees(), 2);

    let first = cmesh.tree(TreeId::new(0)).unwrap();
    assert_eq!(first.cell_type(), CellType::Triangle);
    assert_eq!(
        first.vertices(),
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
    );
    assert_eq!(first.physical_tag(), Some(1));
    assert_eq!(first.entity_tag(), Some(7));

    let second = cmesh.tree(TreeId::new(1)).unwrap();
    assert_eq!(
        second.vertices(),
        &[[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]
    );
}

#[test]
fn tetrahedra_only_with_dimension_three() {
    let dir = tempdir().unwrap();
    let prefix = write_msh(dir.path(), "mixed", MIXED_SURFACE_VOLUME);

    let cmesh = import_mesh(&prefix, 3).expect("import");
    assert_eq!(cmesh.num_trees(), 2);
    assert!(cmesh.trees().iter().all(|t| t.cell_type() == CellType::Tetrahedron));
    assert_eq!(cmesh.trees()[1].vertices()[0], [1.0, 0.0, 0.0]);
    assert_eq!(cmesh.trees()[1].vertices()[3], [0.0, 0.0, 1.0]);
    assert_eq!(cmesh.count_by_type(), vec![(CellType::Tetrahedron, 2)]);
}

#[test]
fn lines_and_points() {
    let dir = tempdir().unwrap();
    let prefix = write_msh(dir.path(), "mixed", MIXED_SURFACE_VOLUME);
    let lines = import_mesh(&prefix, 1).unwrap();
    assert_eq!(lines.num_trees(), 1);
    assert_eq!(lines.trees()[0].cell_type(), CellType::Segment);
    assert!(import_mesh(&prefix, 0).unwrap().is_empty());
}

#[test]
fn hexahedron_vertices_follow_canonical_order() {
    let dir = tempdir().unwrap();
    let text = unit_cube()
        .element(5, &[1, 1], &[1, 2, 3, 4, 5, 6, 7, 8])
        .render();
    let prefix = write_msh(dir.path(), "hex", &text);

    let cmesh = import_mesh(&prefix, 3).unwrap();
    let hex = &cmesh.trees()[0];
    assert_eq!(hex.cell_type(), CellType::Hexahedron);
    let v = hex.vertices();
    // File position i lands at canonical position [0, 1, 5, 4, 2, 3, 7, 6][i].
    assert_eq!(v[0], [0.0, 0.0, 0.0]);
    assert_eq!(v[1], [1.0, 0.0, 0.0]);
    assert_eq!(v[5], [1.0, 1.0, 0.0]);
    assert_eq!(v[4], [0.0, 1.0, 0.0]);
    assert_eq!(v[2], [0.0, 0.0, 1.0]);
    assert_eq!(v[3], [1.0, 0.0, 1.0]);
    assert_eq!(v[7], [1.0, 1.0, 1.0]);
    assert_eq!(v[6], [0.0, 1.0, 1.0]);
}

#[test]
fn prism_keeps_file_order() {
    let dir = tempdir().unwrap();
    let text = MshText::default()
        .node(1, [0.0, 0.0, 0.0])
        .node(2, [1.0, 0.0, 0.0])
        .node(3, [0.0, 1.0, 0.0])
        .node(4, [0.0, 0.0, 2.0])
        .node(5, [1.0, 0.0, 2.0])
        .node(6, [0.0, 1.0, 2.0])
        .element(6, &[], &[1, 2, 3, 4, 5, 6])
        .render();
    let prefix = write_msh(dir.path(), "prism", &text);

    let cmesh = import_mesh(&prefix, 3).unwrap();
    let prism = &cmesh.trees()[0];
    assert_eq!(prism.cell_type(), CellType::Prism);
    assert_eq!(prism.vertices().len(), 6);
    assert_eq!(
        prism.vertices(),
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 2.0],
            [1.0, 0.0, 2.0],
            [0.0, 1.0, 2.0],
        ]
    );
}

#[test]
fn pyramid_swaps_base_corners() {
    let dir = tempdir().unwrap();
    let text = MshText::default()
        .node(1, [0.0, 0.0, 0.0])
        .node(2, [1.0, 0.0, 0.0])
        .node(3, [1.0, 1.0, 0.0])
        .node(4, [0.0, 1.0, 0.0])
        .node(5, [0.5, 0.5, 1.0])
        .element(7, &[0, 0], &[1, 2, 3, 4, 5])
        .render();
    let prefix = write_msh(dir.path(), "pyramid", &text);

    let pyramid = import_mesh(&prefix, 3).unwrap().into_trees().remove(0);
    assert_eq!(
        pyramid.vertices(),
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.5, 0.5, 1.0],
        ]
    );
}

#[test]
fn dangling_node_reference_fails_the_import() {
    let dir = tempdir().unwrap();
    let text = unit_cube()
        .element(4, &[], &[1, 2, 4, 5])
        .element(4, &[], &[2, 3, 4, 99])
        .render();
    let prefix = write_msh(dir.path(), "dangling", &text);

    let err = import_mesh(&prefix, 3).expect_err("undeclared node");
    assert!(
        matches!(err, MeshImportError::DanglingNodeReference { node: 99, ordinal: 2 }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn non_numeric_node_count_is_malformed_header() {
    let dir = tempdir().unwrap();
    let prefix = write_msh(
        dir.path(),
        "bad_count",
        "$Nodes\nfour\n1 0 0 0\n$EndNodes\n$Elements\n0\n$EndElements\n",
    );
    let err = import_mesh(&prefix, 2).expect_err("bad count");
    assert!(
        matches!(
            err,
            MeshImportError::MalformedHeader { section: Section::Nodes, line: 2, .. }
        ),
        "unexpected error: {err:?}"
    );
}

#[test]
fn second_order_line_is_unsupported() {
    let dir = tempdir().unwrap();
    let text = MshText::default()
        .node(1, [0.0, 0.0, 0.0])
        .node(2, [1.0, 0.0, 0.0])
        .node(3, [0.5, 0.0, 0.0])
        .element(8, &[], &[1, 2, 3])
        .render();
    let prefix = write_msh(dir.path(), "p2", &text);

    let err = import_mesh(&prefix, 1).expect_err("second-order element");
    assert!(
        matches!(err, MeshImportError::UnsupportedElementType { code: 8, ordinal: 1 }),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().contains("element type 8"));
}

#[test]
fn missing_sections_and_files() {
    let dir = tempdir().unwrap();

    let err = import_mesh(dir.path().join("does-not-exist"), 2).unwrap_err();
    assert!(matches!(err, MeshImportError::FileNotFound { .. }), "{err:?}");

    let no_nodes = write_msh(dir.path(), "no_nodes", "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n");
    let err = import_mesh(&no_nodes, 2).unwrap_err();
    assert!(
        matches!(err, MeshImportError::MalformedHeader { section: Section::Nodes, .. }),
        "{err:?}"
    );

    let no_elements = write_msh(dir.path(), "no_elements", "$Nodes\n1\n1 0 0 0\n$EndNodes\n");
    let err = import_mesh(&no_elements, 2).unwrap_err();
    assert!(
        matches!(err, MeshImportError::MalformedHeader { section: Section::Elements, .. }),
        "{err:?}"
    );
}

#[test]
fn duplicate_nodes_and_oversized_counts() {
    let dir = tempdir().unwrap();
    let dup = write_msh(
        dir.path(),
        "dup",
        "$Nodes\n2\n3 0 0 0\n3 1 1 1\n$EndNodes\n$Elements\n0\n$EndElements\n",
    );
    let err = import_mesh(&dup, 2).unwrap_err();
    assert!(matches!(err, MeshImportError::DuplicateNode { index: 3, ordinal: 2 }), "{err:?}");

    let huge = write_msh(dir.path(), "huge", "$Nodes\n8589934592\n1 0 0 0\n$EndNodes\n");
    let err = import_mesh(&huge, 2).unwrap_err();
    assert!(
        matches!(
            &err,
            MeshImportError::CountOverflow { section: Section::Nodes, count } if count == "8589934592"
        ),
        "{err:?}"
    );
}

#[test]
fn repeated_imports_are_identical() {
    let dir = tempdir().unwrap();
    let prefix = write_msh(dir.path(), "mixed", MIXED_SURFACE_VOLUME);
    let a = import_mesh(&prefix, 3).unwrap();
    let b = import_mesh(&prefix, 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn custom_extension_and_format_check() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("legacy.gmsh"),
        MIXED_SURFACE_VOLUME.replace("2.2 0 8", "4.1 0 8"),
    )
    .unwrap();
    let prefix = dir.path().join("legacy");

    let strict = ImportOptions::new(2).with_extension("gmsh");
    let err = import_mesh_with_options(&prefix, &strict).unwrap_err();
    assert!(matches!(err, MeshImportError::UnsupportedFormat(_)), "{err:?}");

    let lenient = strict.with_check_format(false);
    assert_eq!(import_mesh_with_options(&prefix, &lenient).unwrap().num_trees(), 2);
}

#[test]
fn committed_mesh_serializes() {
    let dir = tempdir().unwrap();
    let prefix = write_msh(dir.path(), "mixed", MIXED_SURFACE_VOLUME);
    let cmesh = import_mesh(&prefix, 2).unwrap();
    let json = serde_json::to_string(&cmesh).unwrap();
    assert!(json.contains("\"Triangle\""));
    let back: msh_cmesh::cmesh::Cmesh = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmesh);
}

#[test]
fn latin1_comments_and_physical_names_do_not_break_the_import() {
    let dir = tempdir().unwrap();
    let mut bytes = b"# export\xe9 par gmsh\n".to_vec();
    bytes.extend_from_slice(MIXED_SURFACE_VOLUME.replace("\"wall\"", "\"fa@ade\"").as_bytes());
    let at = bytes.iter().position(|&b| b == b'@').unwrap();
    bytes[at] = 0xe7;
    std::fs::write(dir.path().join("latin1.msh"), &bytes).unwrap();

    let cmesh = import_mesh(dir.path().join("latin1"), 2).expect("import");
    assert_eq!(cmesh.num_trees(), 2);
}
