//! # CAD Kernel Seams
//!
//! The mesher never talks to a CAD library directly. A [`CadKernel`] opens a
//! profile into a [`KernelSession`], a scoped value released by `Drop` on every
//! exit path. A [`RingMesher`] turns the outer ring surfaces of a session into
//! a quad mesh.

use std::path::Path;

use glam::DVec3;

use super::{Aabb, AxisInfo};
use crate::error::MeshResult;
use crate::mesh::Mesh;

/// Handle of a 2D surface inside a session.
pub type SurfaceId = usize;

/// Handle of a boundary curve inside a session.
pub type CurveId = usize;

/// Straight auxiliary cut through the profile plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    /// First end point.
    pub start: DVec3,
    /// Second end point.
    pub end: DVec3,
}

/// Opens profile files into sessions.
pub trait CadKernel {
    /// Session type produced by [`open`](Self::open).
    type Session: KernelSession;

    /// Imports the profile at `path`.
    fn open(&self, path: &Path) -> MeshResult<Self::Session>;
}

/// Queries and edits on an imported profile.
///
/// Surface and curve ids are only meaningful until the next
/// [`fragment`](Self::fragment).
pub trait KernelSession {
    /// Bounding box of the whole profile.
    fn bounds(&self) -> MeshResult<Aabb>;

    /// Splits every surface by the cut line and returns the resulting surfaces.
    fn fragment(&mut self, cut: &CutLine) -> MeshResult<Vec<SurfaceId>>;

    /// Bounding box of one surface.
    fn surface_bounds(&self, surface: SurfaceId) -> MeshResult<Aabb>;

    /// Area-weighted centroid of one surface.
    fn surface_center_of_mass(&self, surface: SurfaceId) -> MeshResult<DVec3>;

    /// Boundary curves of one surface.
    fn boundary_curves(&self, surface: SurfaceId) -> MeshResult<Vec<CurveId>>;

    /// Bounding box of one curve.
    fn curve_bounds(&self, curve: CurveId) -> MeshResult<Aabb>;

    /// Point on a curve at normalized parameter `t` in [0, 1].
    fn curve_point(&self, curve: CurveId, t: f64) -> MeshResult<DVec3>;
}

/// Surface mesher for the outer ring.
pub trait RingMesher {
    /// Meshes `surfaces` into 4-node quads at roughly `mesh_size`.
    ///
    /// Returned points keep the profile's original 3D coordinates.
    fn mesh_quads<S: KernelSession>(
        &self,
        session: &S,
        surfaces: &[SurfaceId],
        axes: &AxisInfo,
        mesh_size: f64,
    ) -> MeshResult<Mesh>;
}
