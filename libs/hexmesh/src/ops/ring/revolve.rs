//! # Ring Revolution
//!
//! Sweeps a 2D (R, A) quad section about the canonical axial (+Y) axis.
//!
//! ## Algorithm
//!
//! 1. Angular node layers sit at θ_k = k·φ/(n - 1), k = 0..n-1
//! 2. Each section point (R, A) maps to (R·cos θ, A, R·sin θ)
//! 3. Each quad at layer k and the same quad at layer k + 1 form one hexahedron
//!
//! A full 360° sweep wraps the last layer onto the first instead of emitting
//! coincident duplicate nodes.

use config::constants::{ANGLE_TOLERANCE_DEG, MAX_ANGULAR_STEP_DEG};
use glam::DVec3;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{CellKind, Mesh, QuadMesh2d};

/// Parameters for [`revolve_section`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevolveParams {
    /// Sweep angle in degrees.
    pub angle_deg: f64,
    /// Number of angular node layers (cell layers + 1).
    pub layers: u32,
}

impl RevolveParams {
    /// Returns true for a closed 360° sweep.
    #[inline]
    pub fn is_full_revolution(&self) -> bool {
        (self.angle_deg - 360.0).abs() <= ANGLE_TOLERANCE_DEG
    }
}

/// Angles in radians of `layers` evenly spaced node layers over `angle_deg`.
///
/// # Example
///
/// ```rust
/// use hexmesh::ops::ring::angular_stations;
///
/// let thetas = angular_stations(90.0, 3);
/// assert_eq!(thetas.len(), 3);
/// assert_eq!(thetas[0], 0.0);
/// assert!((thetas[2] - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
/// ```
pub fn angular_stations(angle_deg: f64, layers: u32) -> Vec<f64> {
    let phi = angle_deg.to_radians();
    match layers {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let last = n - 1;
            (0..n)
                .map(|k| if k == last { phi } else { phi * f64::from(k) / f64::from(last) })
                .collect()
        }
    }
}

/// Revolves a quad section into 8-node hexahedra.
///
/// Quads should be CCW in (R, A) with R >= 0; the hexahedra then have
/// positive signed volume.
///
/// # Errors
///
/// [`MeshError::MeshGeneration`] for fewer than two angular layers, a
/// non-positive sweep, or an angular step of 180° or more (which also rules
/// out a full revolution with fewer than four layers).
pub fn revolve_section(section: &QuadMesh2d, params: &RevolveParams) -> MeshResult<Mesh> {
    if !(params.angle_deg > 0.0) {
        return Err(MeshError::generation(format!(
            "revolve angle must be positive, got {}",
            params.angle_deg
        )));
    }
    if params.layers < 2 {
        return Err(MeshError::generation(format!(
            "revolution needs at least 2 angular layers, got {}",
            params.layers
        )));
    }
    let step = params.angle_deg / f64::from(params.layers - 1);
    if step >= MAX_ANGULAR_STEP_DEG {
        return Err(MeshError::generation(format!(
            "angular step {step}° must stay below {MAX_ANGULAR_STEP_DEG}° \
             ({}° over {} layers)",
            params.angle_deg, params.layers
        )));
    }
    let full = params.is_full_revolution();

    let thetas = angular_stations(params.angle_deg, params.layers);
    let cell_layers = thetas.len() - 1;
    let node_layers = if full { cell_layers } else { thetas.len() };
    let np = section.point_count();

    let mut mesh = Mesh::with_capacity(
        CellKind::Hex8,
        np * node_layers,
        section.quad_count() * cell_layers,
    );
    for &theta in &thetas[..node_layers] {
        let (s, c) = theta.sin_cos();
        for p in &section.points {
            mesh.add_point(DVec3::new(p.x * c, p.y, p.x * s));
        }
    }

    let layer_offset = |k: usize| ((k % node_layers) * np) as u32;
    for k in 0..cell_layers {
        let (lo, hi) = (layer_offset(k), layer_offset(k + 1));
        for &[a, b, c, d] in &section.quads {
            mesh.add_cell(&[lo + a, lo + b, lo + c, lo + d, hi + a, hi + b, hi + c, hi + d]);
        }
    }

    debug!(
        layers = params.layers,
        angle = params.angle_deg,
        full,
        points = mesh.point_count(),
        cells = mesh.cell_count(),
        "revolved ring section"
    );
    Ok(mesh)
}
