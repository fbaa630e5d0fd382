//! Role assignment for the three coordinates of a planar profile.

use config::constants::PLANARITY_EPSILON;
use config::Axis;
use tracing::info;

use super::Aabb;
use crate::error::{MeshError, MeshResult};

/// How a planar 2D profile is embedded in 3D.
///
/// The three dimensions are pairwise distinct and the normal dimension's
/// extent is within [`PLANARITY_EPSILON`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisInfo {
    /// In-plane coordinate carrying the radius R.
    pub radial_dim: usize,
    /// In-plane coordinate carrying the axial position A.
    pub axial_dim: usize,
    /// Plane normal (zero thickness).
    pub normal_dim: usize,
}

/// Detects the flat dimension of a profile and assigns radial/axial roles.
///
/// The thinnest bounding-box dimension becomes the normal; the declared
/// revolve axis must lie in the remaining plane and becomes axial.
///
/// # Errors
///
/// [`MeshError::Geometry`] if no dimension is flat enough, or if the revolve
/// axis coincides with the plane normal.
///
/// # Example
///
/// ```rust
/// use config::Axis;
/// use glam::DVec3;
/// use hexmesh::geometry::{detect_profile_axes, Aabb};
///
/// let bounds = Aabb::new(DVec3::ZERO, DVec3::new(10.0, 2.0, 0.0));
/// let axes = detect_profile_axes(&bounds, Axis::Y).unwrap();
/// assert_eq!((axes.radial_dim, axes.axial_dim, axes.normal_dim), (0, 1, 2));
/// ```
pub fn detect_profile_axes(bounds: &Aabb, revolve_axis: Axis) -> MeshResult<AxisInfo> {
    let extent = bounds.extent();
    let normal_dim = (1..3).fold(0, |best, d| if extent[d] < extent[best] { d } else { best });

    if extent[normal_dim] > PLANARITY_EPSILON {
        return Err(MeshError::geometry(format!(
            "profile does not look planar: thinnest extent {:.3e} exceeds {PLANARITY_EPSILON:e} (bounds {:?} .. {:?})",
            extent[normal_dim], bounds.min, bounds.max
        )));
    }

    let axial_dim = revolve_axis.index();
    if axial_dim == normal_dim {
        return Err(MeshError::geometry(format!(
            "revolve axis {revolve_axis} is the profile plane normal; it must lie in the profile plane"
        )));
    }
    let radial_dim = 3 - normal_dim - axial_dim;

    info!(radial_dim, axial_dim, normal_dim, "detected profile axes");
    Ok(AxisInfo {
        radial_dim,
        axial_dim,
        normal_dim,
    })
}
