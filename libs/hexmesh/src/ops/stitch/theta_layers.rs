//! # Theta-Layer Alignment
//!
//! Core and ring are generated independently, so their interface nodes agree
//! only up to floating-point drift. Grouping both sides by angle and copying
//! ring coordinates onto the core makes the later index merge exact.

use std::f64::consts::TAU;

use config::constants::{THETA_RESOLUTION_DIVISOR, THETA_RESOLUTION_MIN};
use tracing::{debug, info, warn};

use crate::mesh::Mesh;

/// Interface nodes sharing one angular position.
#[derive(Debug, Clone, PartialEq)]
pub struct ThetaLayer {
    /// Mean angle of the member nodes in radians.
    pub theta: f64,
    /// Node ids sorted by axial coordinate.
    pub nodes: Vec<u32>,
}

/// Statistics of [`align_interface_layers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerAlignment {
    /// Theta layers found on the core interface.
    pub core_layers: usize,
    /// Theta layers found on the ring interface.
    pub ring_layers: usize,
    /// Core layers paired with a ring layer.
    pub matched_layers: usize,
    /// Core nodes whose coordinates were overwritten.
    pub snapped_nodes: usize,
}

/// Ids of nodes whose distance to the axial (y) axis is within `tol` of `r_core`.
pub fn interface_nodes(mesh: &Mesh, r_core: f64, tol: f64) -> Vec<u32> {
    mesh.points()
        .iter()
        .enumerate()
        .filter(|(_, p)| (p.x.hypot(p.z) - r_core).abs() < tol)
        .map(|(i, _)| i as u32)
        .collect()
}

/// Angular resolution separating neighbouring theta layers.
fn theta_resolution(sweep_deg: f64, layers_hint: u32) -> f64 {
    let step = sweep_deg.to_radians() / f64::from(layers_hint.max(1));
    THETA_RESOLUTION_MIN.max(step / THETA_RESOLUTION_DIVISOR)
}

/// Groups `nodes` of `mesh` into theta layers ordered by angle.
///
/// Angles are taken in `[0, 2π)` and folded below zero when they sit past the
/// middle of the gap the sweep leaves open, so nodes a hair below θ = 0 join
/// the first layer. Nodes closer in angle than the resolution derived from
/// `sweep_deg / layers_hint` share a layer.
pub fn group_theta_layers(mesh: &Mesh, nodes: &[u32], sweep_deg: f64, layers_hint: u32) -> Vec<ThetaLayer> {
    let resolution = theta_resolution(sweep_deg, layers_hint);
    let fold_above = (sweep_deg.to_radians() + TAU) / 2.0;

    let mut angles: Vec<(f64, u32)> = nodes
        .iter()
        .map(|&id| {
            let p = mesh.point(id);
            let mut theta = p.z.atan2(p.x);
            if theta < 0.0 {
                theta += TAU;
            }
            if theta > fold_above {
                theta -= TAU;
            }
            (theta, id)
        })
        .collect();
    angles.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut groups: Vec<Vec<(f64, u32)>> = Vec::new();
    for entry in angles {
        match groups.last_mut() {
            Some(group) if group.last().is_some_and(|&(prev, _)| entry.0 - prev <= resolution) => {
                group.push(entry);
            }
            _ => groups.push(vec![entry]),
        }
    }

    groups
        .into_iter()
        .map(|group| {
            let theta = group.iter().map(|&(t, _)| t).sum::<f64>() / group.len() as f64;
            let mut nodes: Vec<u32> = group.into_iter().map(|(_, id)| id).collect();
            nodes.sort_by(|&a, &b| {
                mesh.point(a)
                    .y
                    .total_cmp(&mesh.point(b).y)
                    .then(a.cmp(&b))
            });
            ThetaLayer { theta, nodes }
        })
        .collect()
}

/// Overwrites core interface coordinates with the matching ring coordinates.
///
/// Each core theta layer is paired greedily with the nearest-angle ring layer
/// not yet used; within a pair, nodes are copied rank by rank in axial order
/// up to the shorter layer's length.
pub fn align_interface_layers(
    core: &mut Mesh,
    ring: &Mesh,
    r_core: f64,
    sweep_deg: f64,
    layers_hint: u32,
    tol_r: f64,
) -> LayerAlignment {
    let core_ids = interface_nodes(core, r_core, tol_r);
    let ring_ids = interface_nodes(ring, r_core, tol_r);
    if core_ids.is_empty() || ring_ids.is_empty() {
        warn!(
            core = core_ids.len(),
            ring = ring_ids.len(),
            "no interface nodes to align"
        );
        return LayerAlignment::default();
    }

    let core_layers = group_theta_layers(core, &core_ids, sweep_deg, layers_hint);
    let ring_layers = group_theta_layers(ring, &ring_ids, sweep_deg, layers_hint);
    if core_layers.len() != ring_layers.len() {
        warn!(
            core = core_layers.len(),
            ring = ring_layers.len(),
            "theta layer count mismatch; pairing by nearest angle"
        );
    }

    let mut used = vec![false; ring_layers.len()];
    let mut stats = LayerAlignment {
        core_layers: core_layers.len(),
        ring_layers: ring_layers.len(),
        ..LayerAlignment::default()
    };
    for layer in &core_layers {
        let best = ring_layers
            .iter()
            .enumerate()
            .filter(|(j, _)| !used[*j])
            .min_by(|(_, a), (_, b)| {
                (a.theta - layer.theta)
                    .abs()
                    .total_cmp(&(b.theta - layer.theta).abs())
            })
            .map(|(j, _)| j);
        let Some(j) = best else {
            break;
        };
        used[j] = true;
        stats.matched_layers += 1;

        let ring_layer = &ring_layers[j];
        for (&c, &r) in layer.nodes.iter().zip(&ring_layer.nodes) {
            core.points_mut()[c as usize] = ring.point(r);
            stats.snapped_nodes += 1;
        }
        debug!(
            core_theta = layer.theta,
            ring_theta = ring_layer.theta,
            core_nodes = layer.nodes.len(),
            ring_nodes = ring_layer.nodes.len(),
            "paired theta layers"
        );
    }

    info!(
        matched_layers = stats.matched_layers,
        snapped = stats.snapped_nodes,
        "aligned interface layers"
    );
    stats
}
