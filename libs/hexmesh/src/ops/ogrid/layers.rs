//! # Interface Layers
//!
//! The core copies the ring's axial spacing at R_core so both meshes share
//! the same node rows across the interface.

use config::constants::{round_to_decimals, INTERFACE_LAYER_DECIMALS};
use tracing::{debug, warn};

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Sorted, de-duplicated axial (y) positions of `ring` nodes on the interface.
///
/// Nodes with `|hypot(x, z) - r_core| < tol` are sampled; positions are
/// rounded to [`INTERFACE_LAYER_DECIMALS`] places and any position closer
/// than `tol` to the previously kept one is dropped as a ghost layer.
///
/// # Errors
///
/// [`MeshError::MeshGeneration`] if fewer than two interface nodes exist.
pub fn interface_axial_positions(ring: &Mesh, r_core: f64, tol: f64) -> MeshResult<Vec<f64>> {
    let mut values: Vec<f64> = ring
        .points()
        .iter()
        .filter(|p| (p.x.hypot(p.z) - r_core).abs() < tol)
        .map(|p| round_to_decimals(p.y, INTERFACE_LAYER_DECIMALS))
        .collect();
    if values.len() < 2 {
        return Err(MeshError::generation(format!(
            "found {} ring nodes at the interface r={r_core}, need at least 2",
            values.len()
        )));
    }
    values.sort_by(f64::total_cmp);
    values.dedup();

    let mut kept: Vec<f64> = Vec::with_capacity(values.len());
    let mut ghosts = 0usize;
    for a in values {
        match kept.last() {
            Some(&prev) if a - prev < tol => ghosts += 1,
            _ => kept.push(a),
        }
    }
    if ghosts > 0 {
        warn!(ghosts, tol, "dropped ghost interface layers");
    }
    debug!(layers = kept.len(), "interface axial positions");
    Ok(kept)
}
