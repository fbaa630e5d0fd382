//! # Geometry Analysis
//!
//! Everything that happens before any hexahedron exists:
//!
//! - **axes**: detect which coordinates of a planar profile are radial, axial and normal
//! - **profile**: clamped piecewise-linear A(R) interpolants for the core's top and bottom
//! - **kernel**: the CAD session and ring mesher seams
//! - **polygon**: a built-in kernel for planar polygonal profiles
//! - **analyzer**: split the profile at R_core and collect everything downstream needs

pub mod analyzer;
pub mod axes;
pub mod kernel;
pub mod polygon;
pub mod profile;

#[cfg(test)]
mod tests;

pub use analyzer::{analyze_geometry_and_split, analyze_session, SplitResult};
pub use axes::{detect_profile_axes, AxisInfo};
pub use kernel::{CadKernel, CurveId, CutLine, KernelSession, RingMesher, SurfaceId};
pub use polygon::{PolygonKernel, PolygonSession, ProfileDocument, ProfileFace};
pub use profile::ProfileCurve;

use glam::DVec3;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Aabb {
    /// Creates a box from two corners in any order.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing all points, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Per-dimension extent.
    #[inline]
    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    /// (min, max) along one coordinate.
    #[inline]
    pub fn range(&self, dim: usize) -> (f64, f64) {
        (self.min[dim], self.max[dim])
    }

    /// Range of |coordinate| along one dimension.
    ///
    /// A box straddling zero starts at 0.
    pub fn abs_range(&self, dim: usize) -> (f64, f64) {
        let (lo, hi) = self.range(dim);
        let far = lo.abs().max(hi.abs());
        if lo <= 0.0 && hi >= 0.0 {
            (0.0, far)
        } else {
            (lo.abs().min(hi.abs()), far)
        }
    }
}
