//! # Order Elevation
//!
//! Promotes 8-node hexahedra to 27-node triquadratic hexahedra. Mid-edge,
//! mid-face and center nodes are placed at the average of their corners and
//! shared between neighbouring cells.
//!
//! Hex27 cells are stored in Gmsh node order:
//!
//! ```text
//!   0..8    corners
//!   8..20   edges  (0,1) (0,3) (0,4) (1,2) (1,5) (2,3) (2,6) (3,7) (4,5) (4,7) (5,6) (6,7)
//!   20..26  faces  (0,3,2,1) (0,1,5,4) (0,4,7,3) (1,2,6,5) (2,3,7,6) (4,5,6,7)
//!   26      center
//! ```

use std::collections::HashMap;

use glam::DVec3;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{CellKind, Mesh};

/// Corner pairs of the twelve Hex27 edge nodes.
pub const HEX27_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [0, 3],
    [0, 4],
    [1, 2],
    [1, 5],
    [2, 3],
    [2, 6],
    [3, 7],
    [4, 5],
    [4, 7],
    [5, 6],
    [6, 7],
];

/// Corner quadruples of the six Hex27 face nodes.
pub const HEX27_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [0, 1, 5, 4],
    [0, 4, 7, 3],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [4, 5, 6, 7],
];

/// Builds the 27-node counterpart of a Hex8 mesh. Corner ids are preserved.
///
/// # Errors
///
/// [`MeshError::Export`] if `mesh` is not a Hex8 mesh.
pub fn elevate_to_hex27(mesh: &Mesh) -> MeshResult<Mesh> {
    if mesh.kind() != CellKind::Hex8 {
        return Err(MeshError::export(format!(
            "order elevation needs hex8 cells, got {}",
            mesh.kind()
        )));
    }

    let mut out = Mesh::with_capacity(CellKind::Hex27, mesh.point_count() * 8, mesh.cell_count());
    for &p in mesh.points() {
        out.add_point(p);
    }

    let mut edges: HashMap<[u32; 2], u32> = HashMap::new();
    let mut faces: HashMap<[u32; 4], u32> = HashMap::new();
    let mut cell = [0u32; 27];
    for corners in mesh.cells() {
        cell[..8].copy_from_slice(corners);
        for (slot, [a, b]) in HEX27_EDGES.iter().enumerate() {
            let ids = [corners[*a], corners[*b]];
            let mut key = ids;
            key.sort_unstable();
            cell[8 + slot] = *edges
                .entry(key)
                .or_insert_with(|| out.add_point(centroid(mesh, &ids)));
        }
        for (slot, face) in HEX27_FACES.iter().enumerate() {
            let ids = face.map(|c| corners[c]);
            let mut key = ids;
            key.sort_unstable();
            cell[20 + slot] = *faces
                .entry(key)
                .or_insert_with(|| out.add_point(centroid(mesh, &ids)));
        }
        cell[26] = out.add_point(centroid(mesh, corners));
        out.add_cell(&cell);
    }

    debug!(
        edges = edges.len(),
        faces = faces.len(),
        points = out.point_count(),
        "elevated to hex27"
    );
    Ok(out)
}

fn centroid(mesh: &Mesh, ids: &[u32]) -> DVec3 {
    ids.iter().map(|&id| mesh.point(id)).sum::<DVec3>() / ids.len() as f64
}
