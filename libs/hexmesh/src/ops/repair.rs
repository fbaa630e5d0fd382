//! # Hexahedron Repair
//!
//! Detects inverted hexahedra with a one-corner triple product and fixes them
//! by a fixed local permutation that reverses both faces' winding while
//! keeping every vertical edge.

use glam::DVec3;
use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{CellKind, Mesh};

/// Local node permutation applied to an inverted 8-node hexahedron.
pub const HEX_FLIP: [usize; 8] = [0, 3, 2, 1, 4, 7, 6, 5];

/// Signed-volume proxy of a hexahedron: `(v1 - v0) × (v3 - v0) · (v4 - v0)`.
///
/// Positive for correctly ordered cells.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hexmesh::ops::hex_signed_volume;
///
/// let cube = [
///     DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0), DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0), DVec3::new(1.0, 0.0, 1.0),
///     DVec3::new(1.0, 1.0, 1.0), DVec3::new(0.0, 1.0, 1.0),
/// ];
/// assert_eq!(hex_signed_volume(&cube, &[0, 1, 2, 3, 4, 5, 6, 7]), 1.0);
/// ```
#[inline]
pub fn hex_signed_volume(points: &[DVec3], cell: &[u32]) -> f64 {
    let p0 = points[cell[0] as usize];
    let e1 = points[cell[1] as usize] - p0;
    let e3 = points[cell[3] as usize] - p0;
    let e4 = points[cell[4] as usize] - p0;
    e1.cross(e3).dot(e4)
}

/// Number of hexahedra with non-positive signed volume.
///
/// Non-hexahedral meshes have none.
pub fn count_inverted_hexes(mesh: &Mesh) -> usize {
    match mesh.kind() {
        CellKind::Hex8 | CellKind::Hex27 => mesh
            .cells()
            .filter(|cell| hex_signed_volume(mesh.points(), cell) <= 0.0)
            .count(),
        CellKind::Quad4 => 0,
    }
}

/// Fixes inverted 8-node hexahedra in place and returns how many were flipped.
///
/// Valid cells are never touched. If any flipped cell is still non-positive
/// the mesh is left unchanged and [`MeshError::MeshIntegrity`] is returned:
/// that indicates node collapse or self-intersection, not an ordering artifact.
pub fn fix_inverted_hexes(mesh: &mut Mesh, label: &str) -> MeshResult<usize> {
    match mesh.kind() {
        CellKind::Hex8 => {}
        CellKind::Quad4 | CellKind::Hex27 => {
            debug!(label, kind = %mesh.kind(), "skipping inversion repair");
            return Ok(0);
        }
    }

    let inverted: Vec<usize> = (0..mesh.cell_count())
        .filter(|&i| hex_signed_volume(mesh.points(), mesh.cell(i)) <= 0.0)
        .collect();
    if inverted.is_empty() {
        debug!(label, "no inverted hexahedra");
        return Ok(0);
    }

    let flipped: Vec<[u32; 8]> = inverted
        .iter()
        .map(|&i| {
            let cell = mesh.cell(i);
            HEX_FLIP.map(|k| cell[k])
        })
        .collect();
    let remaining = flipped
        .iter()
        .filter(|cell| hex_signed_volume(mesh.points(), &cell[..]) <= 0.0)
        .count();
    if remaining > 0 {
        return Err(MeshError::MeshIntegrity {
            label: label.to_string(),
            attempted: inverted.len(),
            remaining,
        });
    }

    for (&i, cell) in inverted.iter().zip(&flipped) {
        mesh.cell_mut(i).copy_from_slice(cell);
    }
    info!(label, fixed = inverted.len(), "fixed inverted hexahedra by flipping node order");
    Ok(inverted.len())
}
