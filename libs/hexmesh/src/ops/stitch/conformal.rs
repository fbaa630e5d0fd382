//! # Conformal Index Merge
//!
//! Core ids stay 0..N-1. Ring nodes matched to a core interface node take
//! that id; every other ring node is appended after the core nodes in its
//! original order.

use config::constants::{STITCH_MATCH_FACTOR, STITCH_MATCH_MIN};
use tracing::{info, warn};

use super::spatial_index::PointIndex;
use super::theta_layers::interface_nodes;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Statistics of [`stitch_conformal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchReport {
    /// Core nodes on the interface.
    pub core_interface: usize,
    /// Ring nodes on the interface.
    pub ring_interface: usize,
    /// Ring interface nodes merged onto a core node.
    pub matched: usize,
    /// Ring interface nodes with no core node within the match distance.
    pub unmatched: usize,
    /// Ring nodes appended after the core nodes.
    pub appended: usize,
}

/// Merges `ring` into `core` through their shared interface nodes.
///
/// Interface nodes lie within `tol_r` of `r_core`; a ring node matches its
/// nearest core interface node when they are at most `5 · tol_r` apart.
///
/// # Errors
///
/// [`MeshError::MeshGeneration`] if the cell kinds differ or either mesh has
/// no interface nodes.
pub fn stitch_conformal(core: Mesh, ring: Mesh, r_core: f64, tol_r: f64) -> MeshResult<(Mesh, StitchReport)> {
    if core.kind() != ring.kind() {
        return Err(MeshError::generation(format!(
            "cannot stitch {} core onto {} ring",
            core.kind(),
            ring.kind()
        )));
    }
    let core_ids = interface_nodes(&core, r_core, tol_r);
    let ring_ids = interface_nodes(&ring, r_core, tol_r);
    if core_ids.is_empty() || ring_ids.is_empty() {
        return Err(MeshError::generation(format!(
            "no interface nodes found at r={r_core} (core={}, ring={})",
            core_ids.len(),
            ring_ids.len()
        )));
    }

    let index = PointIndex::new(core_ids.iter().map(|&id| (id, core.point(id))));
    let max_dist = STITCH_MATCH_MIN.max(STITCH_MATCH_FACTOR * tol_r);

    let mut remap: Vec<Option<u32>> = vec![None; ring.point_count()];
    let mut report = StitchReport {
        core_interface: core_ids.len(),
        ring_interface: ring_ids.len(),
        ..StitchReport::default()
    };
    let mut worst = 0.0f64;
    for &rid in &ring_ids {
        match index.nearest(ring.point(rid)) {
            Some((cid, dist)) if dist <= max_dist => {
                remap[rid as usize] = Some(cid);
                report.matched += 1;
            }
            Some((_, dist)) => {
                worst = worst.max(dist);
                report.unmatched += 1;
            }
            None => report.unmatched += 1,
        }
    }
    if report.unmatched > 0 {
        warn!(
            unmatched = report.unmatched,
            total = ring_ids.len(),
            max_dist,
            worst,
            "ring interface nodes did not match a core node"
        );
    }

    let (mut points, kind, mut connectivity) = core.into_parts();
    let (ring_points, _, ring_connectivity) = ring.into_parts();
    let core_count = points.len() as u32;
    let mut next = core_count;
    let new_ids: Vec<u32> = remap
        .iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                let id = next;
                next += 1;
                id
            })
        })
        .collect();
    points.extend(
        ring_points
            .iter()
            .zip(&remap)
            .filter(|(_, slot)| slot.is_none())
            .map(|(&p, _)| p),
    );
    connectivity.extend(ring_connectivity.iter().map(|&id| new_ids[id as usize]));
    report.appended = (next - core_count) as usize;

    let merged = Mesh::from_parts(points, kind, connectivity)?;
    info!(
        matched = report.matched,
        appended = report.appended,
        nodes = merged.point_count(),
        cells = merged.cell_count(),
        "stitched core and ring"
    );
    Ok((merged, report))
}
