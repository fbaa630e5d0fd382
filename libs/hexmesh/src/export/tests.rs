//! # Export Tests

use super::*;
use crate::mesh::CellKind;
use crate::ops::repair::count_inverted_hexes;
use glam::DVec3;

/// Unit cubes placed side by side along x.
fn cubes(count: u32) -> Mesh {
    let mut mesh = Mesh::new(CellKind::Hex8);
    for z in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for x in 0..=count {
                mesh.add_point(DVec3::new(f64::from(x), y, z));
            }
        }
    }
    let row = count + 1;
    let layer = 2 * row;
    for i in 0..count {
        let b = [i, i + 1, i + 1 + row, i + row];
        mesh.add_cell(&[
            b[0],
            b[1],
            b[2],
            b[3],
            b[0] + layer,
            b[1] + layer,
            b[2] + layer,
            b[3] + layer,
        ]);
    }
    mesh
}

#[test]
fn test_format_from_path() {
    assert_eq!(MeshFormat::from_path("a/b.vtk"), Some(MeshFormat::Vtk));
    assert_eq!(MeshFormat::from_path("b.Msh"), Some(MeshFormat::Gmsh));
    assert_eq!(MeshFormat::from_path("noext"), None);
    assert_eq!(MeshFormat::Gmsh.extension(), "msh");
}

#[test]
fn test_elevate_single_cube() {
    let hex = elevate_to_hex27(&cubes(1)).unwrap();
    assert_eq!(hex.kind(), CellKind::Hex27);
    assert_eq!(hex.point_count(), 27);
    let cell = hex.cell(0);
    assert_eq!(hex.point(cell[8]), DVec3::new(0.5, 0.0, 0.0));
    assert_eq!(hex.point(cell[20]), DVec3::new(0.5, 0.5, 0.0));
    assert_eq!(hex.point(cell[26]), DVec3::splat(0.5));
    assert_eq!(count_inverted_hexes(&hex), 0);
}

#[test]
fn test_elevate_shares_edge_and_face_nodes() {
    let hex = elevate_to_hex27(&cubes(2)).unwrap();
    // 12 corners, 20 edges, 11 faces, 2 centers.
    assert_eq!(hex.point_count(), 45);
    assert!(hex.validate());
}

#[test]
fn test_elevate_order_dispatch() {
    let mesh = cubes(1);
    assert_eq!(elevate_order(&mesh, 1).unwrap(), mesh);
    assert_eq!(elevate_order(&mesh, 2).unwrap().kind(), CellKind::Hex27);
    assert!(matches!(
        elevate_order(&mesh, 3),
        Err(MeshError::NotImplemented { .. })
    ));
    assert!(elevate_to_hex27(&Mesh::new(CellKind::Quad4)).is_err());
}

#[test]
fn test_write_vtk_layout() {
    let mut buf = Vec::new();
    write_vtk(&cubes(2), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# vtk DataFile Version 3.0");
    assert_eq!(lines[3], "DATASET UNSTRUCTURED_GRID");
    assert_eq!(lines[4], "POINTS 12 double");
    assert_eq!(lines[17], "CELLS 2 18");
    assert_eq!(lines[18], "8 0 1 4 3 6 7 10 9");
    assert_eq!(lines[20], "CELL_TYPES 2");
    assert_eq!(lines[21], "12");
}

#[test]
fn test_write_vtk_reorders_hex27() {
    let hex = elevate_to_hex27(&cubes(1)).unwrap();
    let mut buf = Vec::new();
    write_vtk(&hex, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let cell_line = text
        .lines()
        .skip_while(|l| !l.starts_with("CELLS"))
        .nth(1)
        .unwrap();
    let ids: Vec<u32> = cell_line.split_whitespace().map(|t| t.parse().unwrap()).collect();
    assert_eq!(ids[0], 27);
    let gmsh = hex.cell(0);
    // VTK edge 9 is (1,2), Gmsh edge slot 11.
    assert_eq!(ids[1 + 9], gmsh[11]);
    // VTK face 24 is z-min, Gmsh face slot 20.
    assert_eq!(ids[1 + 24], gmsh[20]);
    assert!(text.trim_end().ends_with("29"));
}

#[test]
fn test_write_gmsh_layout() {
    let mut buf = Vec::new();
    write_gmsh(&cubes(1), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(&lines[..3], &["$MeshFormat", "2.2 0 8", "$EndMeshFormat"]);
    assert_eq!(lines[4], "8");
    assert_eq!(lines[5], "1 0 0 0");
    assert_eq!(lines[14], "$Elements");
    assert_eq!(lines[15], "1");
    assert_eq!(lines[16], "1 5 2 1 1 1 2 4 3 5 6 8 7");
    assert_eq!(lines[17], "$EndElements");
}

#[test]
fn test_write_outputs_creates_sibling_msh() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested").join("part.vtk");
    let written = write_outputs(&cubes(2), &output, 1).unwrap();
    assert_eq!(written, vec![output.clone(), output.with_extension("msh")]);
    assert!(written.iter().all(|p| p.is_file()));

    let msh = dir.path().join("only.msh");
    assert_eq!(write_outputs(&cubes(1), &msh, 2).unwrap(), vec![msh.clone()]);
    let text = std::fs::read_to_string(&msh).unwrap();
    assert!(text.contains("\n1 12 2 1 1 "));
}

#[test]
fn test_write_outputs_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("part.stl");
    let err = write_outputs(&cubes(1), &output, 1).unwrap_err();
    assert!(matches!(err, MeshError::Export { .. }));
    assert!(!output.exists());
}

#[test]
fn test_default_output_path() {
    assert_eq!(
        default_output_path(Path::new("cfg/run.yml")),
        PathBuf::from("output/run_o_grid.vtk")
    );
}
