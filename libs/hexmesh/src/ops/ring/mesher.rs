//! # Structured Ring Mesher
//!
//! A [`RingMesher`] that fills each outer surface with a structured quad grid.
//!
//! ## Algorithm
//!
//! 1. Sample the surface boundary curves into a polyline in (r, a)
//! 2. Place `round(width / h)` columns at evenly spaced radial stations
//! 3. At each station, intersect the polyline to get the axial span [a_lo, a_hi]
//! 4. Split every span into `round(max height / h)` rows
//! 5. Concatenate the per-surface grids and merge coincident nodes
//!
//! Each station must cut the surface in a single span, which holds for the
//! radially monotone faces an axisymmetric ring split produces.

use config::constants::{CURVE_SAMPLES, EPSILON, STATION_TOLERANCE_FACTOR};
use glam::{DVec2, DVec3};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::geometry::{AxisInfo, KernelSession, RingMesher, SurfaceId};
use crate::mesh::{CellKind, Mesh};
use crate::ops::merge::merge_duplicate_points_with_backoff;

/// Structured grid mesher for outer ring surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuredRingMesher {
    /// Starting rounding for merging nodes shared between surfaces.
    pub merge_decimals: u32,
}

impl StructuredRingMesher {
    /// Creates a mesher merging shared nodes from `merge_decimals` places.
    pub fn new(merge_decimals: u32) -> Self {
        Self { merge_decimals }
    }
}

impl Default for StructuredRingMesher {
    fn default() -> Self {
        Self::new(config::MeshGenConfig::default().merge_decimals)
    }
}

impl RingMesher for StructuredRingMesher {
    fn mesh_quads<S: KernelSession>(
        &self,
        session: &S,
        surfaces: &[SurfaceId],
        axes: &AxisInfo,
        mesh_size: f64,
    ) -> MeshResult<Mesh> {
        if !(mesh_size > 0.0) {
            return Err(MeshError::generation(format!(
                "mesh size must be positive, got {mesh_size}"
            )));
        }
        let mut mesh = Mesh::new(CellKind::Quad4);
        for &surface in surfaces {
            mesh_surface(session, surface, axes, mesh_size, &mut mesh)?;
        }
        if mesh.cell_count() == 0 {
            return Err(MeshError::generation("no quads generated in outer ring"));
        }

        let outcome = merge_duplicate_points_with_backoff(mesh, self.merge_decimals);
        debug!(
            surfaces = surfaces.len(),
            merged = outcome.merged,
            points = outcome.mesh.point_count(),
            quads = outcome.mesh.cell_count(),
            "structured ring mesh"
        );
        Ok(outcome.mesh)
    }
}

/// Appends the structured grid of one surface to `mesh`.
fn mesh_surface<S: KernelSession>(
    session: &S,
    surface: SurfaceId,
    axes: &AxisInfo,
    mesh_size: f64,
    mesh: &mut Mesh,
) -> MeshResult<()> {
    let (rd, ad, nd) = (axes.radial_dim, axes.axial_dim, axes.normal_dim);
    let bounds = session.surface_bounds(surface)?;
    let (r_lo, r_hi) = bounds.range(rd);
    let width = r_hi - r_lo;
    if !(width > 0.0) {
        return Err(MeshError::generation(format!(
            "outer surface {surface} has no radial extent"
        )));
    }
    let normal = bounds.min[nd];
    let tol = EPSILON.max(STATION_TOLERANCE_FACTOR * width);

    let mut segments: Vec<(DVec2, DVec2)> = Vec::new();
    for curve in session.boundary_curves(surface)? {
        let mut prev: Option<DVec2> = None;
        for i in 0..CURVE_SAMPLES {
            let t = i as f64 / (CURVE_SAMPLES - 1) as f64;
            let p = session.curve_point(curve, t)?;
            let q = DVec2::new(p[rd], p[ad]);
            if let Some(prev) = prev {
                segments.push((prev, q));
            }
            prev = Some(q);
        }
    }

    let columns = grid_count(width, mesh_size);
    let mut spans = Vec::with_capacity(columns + 1);
    for i in 0..=columns {
        let r = if i == columns {
            r_hi
        } else {
            r_lo + width * i as f64 / columns as f64
        };
        let (lo, hi) = axial_span(&segments, r, tol).ok_or_else(|| {
            MeshError::generation(format!(
                "outer surface {surface} has no axial extent at station r={r}"
            ))
        })?;
        if !(hi - lo > tol) {
            return Err(MeshError::generation(format!(
                "outer surface {surface} collapses at station r={r}"
            )));
        }
        spans.push((r, lo, hi));
    }

    let max_height = spans.iter().map(|&(_, lo, hi)| hi - lo).fold(0.0, f64::max);
    let rows = grid_count(max_height, mesh_size);

    let base = mesh.point_count() as u32;
    for &(r, lo, hi) in &spans {
        for j in 0..=rows {
            let a = if j == rows {
                hi
            } else {
                lo + (hi - lo) * j as f64 / rows as f64
            };
            let mut p = DVec3::ZERO;
            p[rd] = r;
            p[ad] = a;
            p[nd] = normal;
            mesh.add_point(p);
        }
    }

    let stride = (rows + 1) as u32;
    for i in 0..columns as u32 {
        for j in 0..rows as u32 {
            let n0 = base + i * stride + j;
            let n1 = base + (i + 1) * stride + j;
            mesh.add_cell(&[n0, n1, n1 + 1, n0 + 1]);
        }
    }
    debug!(surface, columns, rows, "meshed outer surface");
    Ok(())
}

/// Number of intervals of roughly `size` covering `length`, at least one.
fn grid_count(length: f64, size: f64) -> usize {
    ((length / size).round() as usize).max(1)
}

/// Axial extent where the vertical line r = `r` meets the polyline.
fn axial_span(segments: &[(DVec2, DVec2)], r: f64, tol: f64) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut hit = |a: f64| {
        lo = lo.min(a);
        hi = hi.max(a);
    };
    for &(p, q) in segments {
        let (dp, dq) = (p.x - r, q.x - r);
        if dp.abs() <= tol {
            hit(p.y);
        }
        if dq.abs() <= tol {
            hit(q.y);
        }
        if dp * dq < 0.0 && dp.abs() > tol && dq.abs() > tol {
            let t = dp / (dp - dq);
            hit(p.y + t * (q.y - p.y));
        }
    }
    (lo <= hi).then_some((lo, hi))
}
