//! # Core Extrusion
//!
//! Stacks the 2D core section into hexahedra. The axial layering is copied
//! from the ring interface as fractional heights, then re-applied per node
//! between that node's own bottom and top, so the core follows the curved
//! profile instead of forming a straight prism.

use config::constants::{approx_zero, CORE_BOUNDARY_TOLERANCE_FACTOR, CORE_BOUNDARY_TOLERANCE_MIN};
use glam::{DVec2, DVec3};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::geometry::ProfileCurve;
use crate::mesh::{CellKind, Mesh, QuadMesh2d};

/// Extrudes `section` through the axial positions `a_interface`.
///
/// Points come out as (x, A, z). Section nodes within the boundary tolerance
/// of `r_core` are placed exactly on the interface circle at their own angle.
///
/// # Errors
///
/// [`MeshError::MeshGeneration`] for fewer than two axial positions.
pub fn extrude_core(
    section: &QuadMesh2d,
    a_interface: &[f64],
    r_core: f64,
    a_bot: &ProfileCurve,
    a_top: &ProfileCurve,
) -> MeshResult<Mesh> {
    if a_interface.len() < 2 {
        return Err(MeshError::generation(format!(
            "core extrusion needs at least 2 axial layers, got {}",
            a_interface.len()
        )));
    }

    let bot_ref = a_bot.eval(r_core);
    let h_ref = a_top.eval(r_core) - bot_ref;
    let etas: Vec<f64> = if approx_zero(h_ref) {
        let last = (a_interface.len() - 1) as f64;
        (0..a_interface.len()).map(|k| k as f64 / last).collect()
    } else {
        a_interface.iter().map(|a| (a - bot_ref) / h_ref).collect()
    };

    let tol = CORE_BOUNDARY_TOLERANCE_MIN.max(CORE_BOUNDARY_TOLERANCE_FACTOR * r_core);
    let mut snapped = 0usize;
    let nodes: Vec<(DVec2, f64, f64)> = section
        .points
        .iter()
        .map(|&p| {
            let r = p.length();
            let xz = if (r - r_core).abs() < tol {
                snapped += 1;
                let theta = p.y.atan2(p.x);
                r_core * DVec2::new(theta.cos(), theta.sin())
            } else {
                p
            };
            (xz, a_bot.eval(r), a_top.eval(r))
        })
        .collect();

    let np = nodes.len();
    let mut mesh = Mesh::with_capacity(
        CellKind::Hex8,
        np * etas.len(),
        section.quad_count() * (etas.len() - 1),
    );
    for &eta in &etas {
        for &(xz, bot, top) in &nodes {
            mesh.add_point(DVec3::new(xz.x, bot + eta * (top - bot), xz.y));
        }
    }
    for k in 0..etas.len() - 1 {
        let lo = (k * np) as u32;
        let hi = lo + np as u32;
        for &[a, b, c, d] in &section.quads {
            mesh.add_cell(&[lo + a, lo + b, lo + c, lo + d, hi + a, hi + b, hi + c, hi + d]);
        }
    }

    debug!(
        layers = etas.len(),
        h_ref,
        snapped,
        points = mesh.point_count(),
        cells = mesh.cell_count(),
        "extruded core"
    );
    Ok(mesh)
}
