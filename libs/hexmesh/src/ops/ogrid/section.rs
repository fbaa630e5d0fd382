//! # Quarter O-Grid Cross-Section
//!
//! Builds the 2D core section in the canonical (x, z) plane. Node layout:
//!
//! - inner block nodes first, id = i + j·(n_upper + 1) for
//!   i ∈ 0..=n_upper along x and j ∈ 0..=n_lower along z
//! - then, per angular station k, the annulus nodes m = 1..=radial_layers
//!
//! The L-shaped boundary of the inner block (right edge then top edge) holds
//! exactly one node per angular station, so every annulus ray ends on the
//! same θ the ring revolution uses.

use config::constants::{
    DEGENERATE_THICKNESS_FACTOR, EPSILON, INNER_BLOCK_SAFETY_SCALE, MAX_INNER_RATIO,
    MAX_SPLIT_TANGENT, MIN_INNER_RATIO, MIN_RADIAL_LAYERS, MIN_SPLIT_TANGENT,
};
use glam::DVec2;
use tracing::debug;

use crate::mesh::QuadMesh2d;
use crate::ops::ring::angular_stations;

/// Parameters for [`create_quarter_ogrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OGridParams {
    /// Outer circle radius (R_core).
    pub radius: f64,
    /// Angular divisions below the split ray (right edge of the inner block).
    pub n_lower: u32,
    /// Angular divisions above the split ray (top edge of the inner block).
    pub n_upper: u32,
    /// Sweep angle in degrees.
    pub sweep_deg: f64,
    /// Inner block size as a fraction of `radius`.
    pub inner_ratio: f64,
    /// Radial annulus layers; 0 picks `max(2, divisions / 2)`.
    pub radial_layers: u32,
    /// Grading exponent; values above 1 cluster layers toward the outer arc.
    pub beta: f64,
    /// Emit clockwise quads instead of counter-clockwise.
    pub flip_winding: bool,
}

impl OGridParams {
    /// Total angular divisions of the quadrant.
    #[inline]
    pub fn divisions(&self) -> u32 {
        self.n_lower + self.n_upper
    }

    /// Radial layer count after resolving the automatic choice.
    pub fn resolved_radial_layers(&self) -> u32 {
        if self.radial_layers > 0 {
            self.radial_layers
        } else {
            MIN_RADIAL_LAYERS.max(self.divisions() / 2)
        }
    }
}

/// Half-widths of the inner block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerBlock {
    /// Extent along x after the safety scale.
    pub width_x: f64,
    /// Extent along z after the safety scale.
    pub width_z: f64,
    /// Area before the safety scale; `(inner_ratio · radius)²` by construction.
    pub unscaled_area: f64,
    /// Factor applied to keep the block corner inside the circle.
    pub scale: f64,
}

impl InnerBlock {
    /// Area after scaling.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width_x * self.width_z
    }
}

/// A built cross-section with its sizing metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreSection {
    /// Cross-section quads in the (x, z) plane.
    pub section: QuadMesh2d,
    /// `None` for the degenerate single-quad section.
    pub inner: Option<InnerBlock>,
    /// Annulus layers actually built.
    pub radial_layers: u32,
}

/// Builds the quarter O-grid cross-section. Never fails: fewer than one
/// angular division yields a single sliver quad.
pub fn create_quarter_ogrid(params: &OGridParams) -> CoreSection {
    let nx = params.n_upper;
    let ny = params.n_lower;
    let total = params.divisions();
    let radius = params.radius;

    if total < 1 {
        let eps = DEGENERATE_THICKNESS_FACTOR.max(radius * DEGENERATE_THICKNESS_FACTOR);
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(radius, 0.0),
            DVec2::new(radius, eps),
            DVec2::new(0.0, eps),
        ];
        let quad = if params.flip_winding { [0, 3, 2, 1] } else { [0, 1, 2, 3] };
        debug!(radius, "degenerate core section");
        return CoreSection {
            section: QuadMesh2d::new(points, vec![quad]),
            inner: None,
            radial_layers: 0,
        };
    }

    let thetas = angular_stations(params.sweep_deg, total + 1);
    let block = size_inner_block(radius, params.inner_ratio, thetas[ny as usize]);
    let (ax, az) = (block.width_x, block.width_z);

    // Right edge follows the rays below the split, top edge the rays above it.
    let z_right: Vec<f64> = (0..=ny as usize)
        .map(|j| {
            let th = thetas[j];
            let z = if th.cos().abs() > EPSILON { ax * th.tan() } else { az };
            z.clamp(0.0, az)
        })
        .collect();
    let x_top: Vec<f64> = (0..=nx as usize)
        .map(|i| {
            let th = thetas[total as usize - i];
            let t = th.tan();
            let x = if th.sin().abs() < EPSILON || t.abs() < EPSILON { ax } else { az / t };
            x.clamp(0.0, ax)
        })
        .collect();

    let ncols = nx + 1;
    let nrows = ny + 1;
    let radial_layers = params.resolved_radial_layers();
    let mut points = Vec::with_capacity((ncols * nrows + (total + 1) * radial_layers) as usize);

    // Coons patch over the block: bottom z=0, left x=0, warped right and top.
    let corners = [
        DVec2::ZERO,
        DVec2::new(ax, 0.0),
        DVec2::new(0.0, az),
        DVec2::new(ax, az),
    ];
    for j in 0..nrows {
        let t = if ny == 0 { 0.0 } else { f64::from(j) / f64::from(ny) };
        let left = DVec2::new(0.0, az * t);
        let right = DVec2::new(ax, z_right[j as usize]);
        for i in 0..ncols {
            let s = if nx == 0 { 0.0 } else { f64::from(i) / f64::from(nx) };
            let bottom = DVec2::new(ax * s, 0.0);
            let top = DVec2::new(x_top[i as usize], az);
            let ruled = (1.0 - t) * bottom + t * top + (1.0 - s) * left + s * right;
            let bilinear = (1.0 - s) * (1.0 - t) * corners[0]
                + s * (1.0 - t) * corners[1]
                + (1.0 - s) * t * corners[2]
                + s * t * corners[3];
            points.push(ruled - bilinear);
        }
    }

    let mut quads = Vec::with_capacity((nx * ny + total * radial_layers) as usize);
    for j in 0..ny {
        for i in 0..nx {
            let n0 = i + j * ncols;
            quads.push([n0, n0 + 1, n0 + 1 + ncols, n0 + ncols]);
        }
    }

    // rays[k][m]: node on angular station k at radial layer m.
    let beta = if params.beta > 0.0 { params.beta } else { 1.0 };
    let eta = |m: u32| (f64::from(m) / f64::from(radial_layers)).powf(1.0 / beta);
    let mut rays: Vec<Vec<u32>> = Vec::with_capacity(thetas.len());
    for (k, &th) in thetas.iter().enumerate() {
        let k = k as u32;
        let start = if k <= ny { nx + k * ncols } else { (total - k) + ny * ncols };
        let inner = points[start as usize];
        let outer = radius * DVec2::new(th.cos(), th.sin());
        let mut ray = Vec::with_capacity(radial_layers as usize + 1);
        ray.push(start);
        for m in 1..=radial_layers {
            let e = eta(m);
            ray.push(points.len() as u32);
            points.push((1.0 - e) * inner + e * outer);
        }
        rays.push(ray);
    }
    for pair in rays.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        for m in 0..radial_layers as usize {
            quads.push([lo[m], lo[m + 1], hi[m + 1], hi[m]]);
        }
    }

    if params.flip_winding {
        for q in &mut quads {
            q.swap(1, 3);
        }
    }

    debug!(
        radius,
        n_lower = ny,
        n_upper = nx,
        radial_layers,
        points = points.len(),
        quads = quads.len(),
        "built quarter o-grid"
    );
    CoreSection {
        section: QuadMesh2d::new(points, quads),
        inner: Some(block),
        radial_layers,
    }
}

/// Sizes the inner block so its corner lies on the ray at `theta_split` while
/// its unscaled area stays `(ratio · radius)²`.
fn size_inner_block(radius: f64, inner_ratio: f64, theta_split: f64) -> InnerBlock {
    let base = inner_ratio.clamp(MIN_INNER_RATIO, MAX_INNER_RATIO) * radius;
    let mut tan = theta_split.tan();
    if tan.abs() < EPSILON {
        tan = 1.0;
    }
    let tan = tan.clamp(MIN_SPLIT_TANGENT, MAX_SPLIT_TANGENT);
    let ax = base / tan.sqrt();
    let az = base * tan.sqrt();
    let limit = INNER_BLOCK_SAFETY_SCALE * radius;
    let scale = (limit / ax.max(EPSILON)).min(limit / az.max(EPSILON)).min(1.0);
    InnerBlock {
        width_x: ax * scale,
        width_z: az * scale,
        unscaled_area: ax * az,
        scale,
    }
}
