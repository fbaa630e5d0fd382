//! # Geometry Analyzer
//!
//! Imports a planar profile, splits it at R_core and extracts everything the
//! ring and core paths need.
//!
//! ## Algorithm
//!
//! 1. Detect the normal/radial/axial dimensions from the profile bounds
//! 2. R_core = ratio × max(|r_min|, |r_max|)
//! 3. Fragment the profile with a cut line at r = ±R_core on the side carrying
//!    the larger radial extent, spanning the axial extent plus a margin
//! 4. Classify surfaces as inner/outer by radius, falling back to the centroid
//! 5. Sample the inner boundary curves (excluding the interface and the axis)
//!    into (R, A) pairs and split them into top/bottom groups by mean A
//! 6. Mesh the outer surfaces with the ring mesher

use std::collections::BTreeSet;
use std::path::Path;

use config::constants::{
    CURVE_CLASSIFY_TOLERANCE, CURVE_SAMPLES, CUT_LINE_MARGIN_FRACTION, CUT_LINE_MIN_MARGIN,
    MIN_PROFILE_GROUP_SAMPLES, SURFACE_SPLIT_TOLERANCE,
};
use config::MeshGenConfig;
use glam::{DVec2, DVec3};
use tracing::{debug, info};

use super::axes::{detect_profile_axes, AxisInfo};
use super::kernel::{CadKernel, CutLine, KernelSession, RingMesher, SurfaceId};
use super::profile::ProfileCurve;
use crate::error::{MeshError, MeshResult};
use crate::mesh::{CellKind, Mesh, QuadMesh2d};

/// Output of the geometry analysis.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Outer ring quad mesh in the profile's original 3D coordinates.
    pub ring: Mesh,
    /// Interface radius between core and ring.
    pub r_core: f64,
    /// Coordinate roles of the profile.
    pub axes: AxisInfo,
    /// Axial position of the core's bottom boundary as a function of R.
    pub a_bot: ProfileCurve,
    /// Axial position of the core's top boundary as a function of R.
    pub a_top: ProfileCurve,
}

impl SplitResult {
    /// The ring mesh projected into (|R|, A).
    pub fn ring_section(&self) -> QuadMesh2d {
        let AxisInfo {
            radial_dim,
            axial_dim,
            ..
        } = self.axes;
        let points = self
            .ring
            .points()
            .iter()
            .map(|p| DVec2::new(p[radial_dim].abs(), p[axial_dim]))
            .collect();
        let quads = self
            .ring
            .cells()
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        QuadMesh2d::new(points, quads)
    }
}

/// Runs the full analysis on a profile file.
///
/// The kernel session is opened once and released when this function
/// returns, on success and on every error path.
pub fn analyze_geometry_and_split<K, M>(
    kernel: &K,
    mesher: &M,
    profile: &Path,
    cfg: &MeshGenConfig,
) -> MeshResult<SplitResult>
where
    K: CadKernel,
    M: RingMesher,
{
    let mut session = kernel.open(profile)?;
    analyze_session(&mut session, mesher, cfg)
}

/// Runs the analysis on an already open session.
pub fn analyze_session<S, M>(session: &mut S, mesher: &M, cfg: &MeshGenConfig) -> MeshResult<SplitResult>
where
    S: KernelSession,
    M: RingMesher,
{
    let bounds = session.bounds()?;
    let axes = detect_profile_axes(&bounds, cfg.revolve_axis)?;
    let AxisInfo {
        radial_dim: rd,
        axial_dim: ad,
        ..
    } = axes;

    let (r_min, r_max) = bounds.range(rd);
    let r_abs_max = r_min.abs().max(r_max.abs());
    let r_core = cfg.ogrid_core_ratio * r_abs_max;
    let side = if r_max.abs() >= r_min.abs() { 1.0 } else { -1.0 };
    info!(r_core, r_abs_max, "core radius");

    let (a_min, a_max) = bounds.range(ad);
    let margin = CUT_LINE_MIN_MARGIN.max(CUT_LINE_MARGIN_FRACTION * (a_max - a_min));
    let mut start = DVec3::ZERO;
    let mut end = DVec3::ZERO;
    start[rd] = side * r_core;
    end[rd] = side * r_core;
    start[ad] = a_min - margin;
    end[ad] = a_max + margin;

    let surfaces = session.fragment(&CutLine { start, end })?;
    if surfaces.is_empty() {
        return Err(MeshError::geometry(
            "no 2D surfaces after fragmenting; the profile does not define a surface",
        ));
    }

    let (outer, inner) = split_surfaces_by_radius(session, &surfaces, &axes, r_core)?;
    debug!(outer = outer.len(), inner = inner.len(), "classified surfaces");
    if outer.is_empty() {
        return Err(MeshError::geometry("failed to identify outer ring surfaces after split"));
    }

    let (a_bot, a_top) = extract_profile(session, &inner, &axes, r_core)?;
    let ring = mesher.mesh_quads(&*session, &outer, &axes, cfg.mesh_size)?;
    if ring.kind() != CellKind::Quad4 || ring.cell_count() == 0 {
        return Err(MeshError::generation("ring mesher produced no usable quads"));
    }
    info!(
        points = ring.point_count(),
        quads = ring.cell_count(),
        "meshed outer ring"
    );

    Ok(SplitResult {
        ring,
        r_core,
        axes,
        a_bot,
        a_top,
    })
}

/// Classifies surfaces into (outer, inner) by their radial span.
fn split_surfaces_by_radius<S: KernelSession>(
    session: &S,
    surfaces: &[SurfaceId],
    axes: &AxisInfo,
    r_core: f64,
) -> MeshResult<(Vec<SurfaceId>, Vec<SurfaceId>)> {
    let rd = axes.radial_dim;
    let mut outer = Vec::new();
    let mut inner = Vec::new();
    for &surface in surfaces {
        let (lo, hi) = session.surface_bounds(surface)?.abs_range(rd);
        if hi <= r_core + SURFACE_SPLIT_TOLERANCE {
            inner.push(surface);
        } else if lo >= r_core - SURFACE_SPLIT_TOLERANCE {
            outer.push(surface);
        } else {
            let com = session.surface_center_of_mass(surface)?;
            if com[rd].abs() > r_core {
                outer.push(surface);
            } else {
                inner.push(surface);
            }
        }
    }
    Ok((outer, inner))
}

/// Builds the (A_bot, A_top) interpolants from the inner surfaces' boundary.
fn extract_profile<S: KernelSession>(
    session: &S,
    inner: &[SurfaceId],
    axes: &AxisInfo,
    r_core: f64,
) -> MeshResult<(ProfileCurve, ProfileCurve)> {
    let (rd, ad) = (axes.radial_dim, axes.axial_dim);

    let mut curves = BTreeSet::new();
    for &surface in inner {
        curves.extend(session.boundary_curves(surface)?);
    }

    let mut valid = Vec::new();
    let mut axis_curves = Vec::new();
    for curve in curves {
        let (r0, r1) = session.curve_bounds(curve)?.range(rd);
        let near = |target: f64| {
            (r0.abs() - target).abs() < CURVE_CLASSIFY_TOLERANCE
                && (r1.abs() - target).abs() < CURVE_CLASSIFY_TOLERANCE
        };
        if near(r_core) {
            continue;
        }
        if near(0.0) {
            axis_curves.push(curve);
            continue;
        }
        valid.push(curve);
    }

    if valid.is_empty() && axis_curves.is_empty() {
        return Err(MeshError::geometry(
            "failed to extract inner profile curves (no valid boundary curves found)",
        ));
    }

    let mut samples: Vec<(f64, f64)> = Vec::with_capacity(valid.len() * CURVE_SAMPLES);
    for &curve in &valid {
        for i in 0..CURVE_SAMPLES {
            let t = i as f64 / (CURVE_SAMPLES - 1) as f64;
            let p = session.curve_point(curve, t)?;
            samples.push((p[rd].abs(), p[ad]));
        }
    }
    for &curve in &axis_curves {
        for t in [0.0, 1.0] {
            let p = session.curve_point(curve, t)?;
            samples.push((0.0, p[ad]));
        }
    }

    let (bot, top) = split_top_bottom(&samples)?;
    debug!(
        top = top.len(),
        bottom = bot.len(),
        curves = valid.len(),
        axis_curves = axis_curves.len(),
        "sampled inner profile"
    );

    let a_bot = ProfileCurve::from_samples(&bot).anchored_at_axis();
    let a_top = ProfileCurve::from_samples(&top).anchored_at_axis();
    Ok((a_bot, a_top))
}

/// Splits samples into (bottom, top) by comparison with their mean axial value.
fn split_top_bottom(samples: &[(f64, f64)]) -> MeshResult<(Vec<(f64, f64)>, Vec<(f64, f64)>)> {
    if samples.is_empty() {
        return Err(MeshError::geometry("curve sampling produced no points"));
    }
    let mean = samples.iter().map(|s| s.1).sum::<f64>() / samples.len() as f64;
    let (top, bot): (Vec<_>, Vec<_>) = samples.iter().copied().partition(|s| s.1 > mean);
    if top.len() < MIN_PROFILE_GROUP_SAMPLES || bot.len() < MIN_PROFILE_GROUP_SAMPLES {
        return Err(MeshError::geometry(format!(
            "degenerate top/bottom split by mean axial value {mean:.6} (top={}, bottom={})",
            top.len(),
            bot.len()
        )));
    }
    Ok((bot, top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_top_bottom_by_mean() {
        let samples = [(0.0, 0.0), (1.0, 0.0), (0.0, 2.0), (1.0, 2.0)];
        let (bot, top) = split_top_bottom(&samples).unwrap();
        assert_eq!(bot.len(), 2);
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|s| s.1 == 2.0));
    }

    #[test]
    fn test_split_top_bottom_degenerate() {
        let flat = [(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)];
        assert!(matches!(
            split_top_bottom(&flat),
            Err(MeshError::Geometry { .. })
        ));
        assert!(split_top_bottom(&[]).is_err());
    }
}
