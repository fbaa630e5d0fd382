//! # Duplicate-Point Merging
//!
//! Coincident points are merged by rounding coordinates to a number of
//! decimals. Rounding too coarsely can fold two distinct nodes of one cell
//! together, so the backoff variant retries with finer rounding until no cell
//! degenerates, and keeps the unmerged mesh when every attempt fails.

use std::collections::HashMap;

use config::constants::MAX_MERGE_DECIMALS;
use tracing::{debug, info, warn};

use crate::mesh::Mesh;

/// Result of [`merge_duplicate_points_with_backoff`].
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The merged mesh, or the input unchanged when every attempt failed.
    pub mesh: Mesh,
    /// Rounding that succeeded, `None` if the backoff was exhausted.
    pub decimals: Option<u32>,
    /// Number of points removed.
    pub merged: usize,
}

/// Merges points equal after rounding to `decimals` places.
///
/// The first occurrence of each rounded position is kept with its original
/// coordinates; surviving points keep their relative order.
pub fn merge_duplicate_points(mesh: &Mesh, decimals: u32) -> Mesh {
    let scale = 10f64.powi(decimals.min(MAX_MERGE_DECIMALS) as i32);
    let key = |v: f64| (v * scale).round() as i64;

    let mut lookup: HashMap<[i64; 3], u32> = HashMap::with_capacity(mesh.point_count());
    let mut remap = Vec::with_capacity(mesh.point_count());
    let mut merged = Mesh::with_capacity(mesh.kind(), mesh.point_count(), mesh.cell_count());
    for &p in mesh.points() {
        let id = *lookup
            .entry([key(p.x), key(p.y), key(p.z)])
            .or_insert_with(|| merged.add_point(p));
        remap.push(id);
    }

    let mut cell = Vec::with_capacity(mesh.kind().arity());
    for old in mesh.cells() {
        cell.clear();
        cell.extend(old.iter().map(|&id| remap[id as usize]));
        merged.add_cell(&cell);
    }
    merged
}

/// Merges duplicates, retrying with finer rounding from `start_decimals` up to
/// [`MAX_MERGE_DECIMALS`] while any cell would reference a node twice.
pub fn merge_duplicate_points_with_backoff(mesh: Mesh, start_decimals: u32) -> MergeOutcome {
    for decimals in start_decimals..=MAX_MERGE_DECIMALS {
        let candidate = merge_duplicate_points(&mesh, decimals);
        let degenerate = candidate.degenerate_cell_count();
        if degenerate == 0 {
            if decimals != start_decimals {
                info!(from = start_decimals, to = decimals, "raised merge rounding to avoid degenerate cells");
            }
            let merged = mesh.point_count() - candidate.point_count();
            return MergeOutcome {
                mesh: candidate,
                decimals: Some(decimals),
                merged,
            };
        }
        debug!(decimals, degenerate, "merge produced degenerate cells; trying finer rounding");
    }
    warn!("could not merge points without degenerate cells; keeping unmerged mesh");
    MergeOutcome {
        mesh,
        decimals: None,
        merged: 0,
    }
}
