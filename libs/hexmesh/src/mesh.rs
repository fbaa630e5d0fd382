//! # Mesh Data Structures
//!
//! Volume/surface meshes with a fixed cell kind, and the 2D quad sections that
//! are revolved or extruded into them.

use std::fmt;

use glam::{DVec2, DVec3};

use crate::error::{MeshError, MeshResult};

/// Element kind carried by every cell of a [`Mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// 4-node quadrilateral.
    Quad4,
    /// 8-node linear hexahedron.
    Hex8,
    /// 27-node triquadratic hexahedron (Gmsh node ordering).
    Hex27,
}

impl CellKind {
    /// Number of node ids per cell.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            CellKind::Quad4 => 4,
            CellKind::Hex8 => 8,
            CellKind::Hex27 => 27,
        }
    }

    /// Returns true for volume elements.
    #[inline]
    pub const fn is_volume(self) -> bool {
        match self {
            CellKind::Quad4 => false,
            CellKind::Hex8 | CellKind::Hex27 => true,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Quad4 => "quad4",
            CellKind::Hex8 => "hex8",
            CellKind::Hex27 => "hex27",
        };
        f.write_str(name)
    }
}

/// An unstructured mesh: ordered points (index = node id) and fixed-arity cells.
///
/// Connectivity is stored flat, `kind.arity()` ids per cell.
///
/// # Example
///
/// ```rust
/// use hexmesh::mesh::{CellKind, Mesh};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new(CellKind::Quad4);
/// mesh.add_point(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_point(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_point(DVec3::new(1.0, 1.0, 0.0));
/// mesh.add_point(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_cell(&[0, 1, 2, 3]);
/// assert_eq!(mesh.cell_count(), 1);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    points: Vec<DVec3>,
    kind: CellKind,
    connectivity: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh of the given cell kind.
    pub fn new(kind: CellKind) -> Self {
        Self {
            points: Vec::new(),
            kind,
            connectivity: Vec::new(),
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(kind: CellKind, point_count: usize, cell_count: usize) -> Self {
        Self {
            points: Vec::with_capacity(point_count),
            kind,
            connectivity: Vec::with_capacity(cell_count * kind.arity()),
        }
    }

    /// Builds a mesh from raw parts, checking arity and index bounds.
    pub fn from_parts(points: Vec<DVec3>, kind: CellKind, connectivity: Vec<u32>) -> MeshResult<Self> {
        if connectivity.len() % kind.arity() != 0 {
            return Err(MeshError::generation(format!(
                "connectivity length {} is not a multiple of {} ({kind})",
                connectivity.len(),
                kind.arity()
            )));
        }
        let n = points.len();
        if let Some(bad) = connectivity.iter().find(|&&id| id as usize >= n) {
            return Err(MeshError::generation(format!(
                "node id {bad} out of range for {n} points"
            )));
        }
        Ok(Self {
            points,
            kind,
            connectivity,
        })
    }

    /// Decomposes the mesh into (points, kind, flat connectivity).
    pub fn into_parts(self) -> (Vec<DVec3>, CellKind, Vec<u32>) {
        (self.points, self.kind, self.connectivity)
    }

    /// Returns the cell kind.
    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Returns the number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.connectivity.len() / self.kind.arity()
    }

    /// Returns true if the mesh has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adds a point and returns its id.
    pub fn add_point(&mut self, position: DVec3) -> u32 {
        let index = self.points.len() as u32;
        self.points.push(position);
        index
    }

    /// Adds a cell by node ids. The slice length must match the cell arity.
    pub fn add_cell(&mut self, nodes: &[u32]) {
        debug_assert_eq!(nodes.len(), self.kind.arity(), "cell arity mismatch");
        self.connectivity.extend_from_slice(nodes);
    }

    /// Returns the points.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns the points for in-place coordinate edits.
    #[inline]
    pub fn points_mut(&mut self) -> &mut [DVec3] {
        &mut self.points
    }

    /// Returns the point with the given id.
    #[inline]
    pub fn point(&self, id: u32) -> DVec3 {
        self.points[id as usize]
    }

    /// Returns the flat connectivity.
    #[inline]
    pub fn connectivity(&self) -> &[u32] {
        &self.connectivity
    }

    /// Iterates over cells as node-id slices.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.connectivity.chunks_exact(self.kind.arity())
    }

    /// Returns the node ids of one cell.
    #[inline]
    pub fn cell(&self, index: usize) -> &[u32] {
        let n = self.kind.arity();
        &self.connectivity[index * n..(index + 1) * n]
    }

    /// Returns the node ids of one cell for reordering.
    #[inline]
    pub fn cell_mut(&mut self, index: usize) -> &mut [u32] {
        let n = self.kind.arity();
        &mut self.connectivity[index * n..(index + 1) * n]
    }

    /// Computes the axis-aligned bounding box as (min, max).
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.points.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.points[1..]
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
    }

    /// Number of cells referencing the same node more than once.
    pub fn degenerate_cell_count(&self) -> usize {
        self.cells().filter(|cell| has_repeated_id(cell)).count()
    }

    /// Validates the mesh.
    ///
    /// Checks:
    /// - All cell ids are valid point indices
    /// - No cell references a node twice
    pub fn validate(&self) -> bool {
        let n = self.points.len();
        self.connectivity.iter().all(|&id| (id as usize) < n) && self.degenerate_cell_count() == 0
    }
}

fn has_repeated_id(cell: &[u32]) -> bool {
    cell.iter()
        .enumerate()
        .any(|(i, id)| cell[i + 1..].contains(id))
}

/// A planar quadrilateral section: 2D points plus quads.
///
/// Used for the ring profile in (R, A) and for the core cross-section in (x, z).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadMesh2d {
    /// Point coordinates.
    pub points: Vec<DVec2>,
    /// Quad connectivity.
    pub quads: Vec<[u32; 4]>,
}

impl QuadMesh2d {
    /// Creates a section from points and quads.
    pub fn new(points: Vec<DVec2>, quads: Vec<[u32; 4]>) -> Self {
        Self { points, quads }
    }

    /// Returns the number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of quads.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Twice the signed (shoelace) area of a quad; positive when CCW.
    pub fn signed_area2(&self, quad: &[u32; 4]) -> f64 {
        (0..4)
            .map(|i| {
                let a = self.points[quad[i] as usize];
                let b = self.points[quad[(i + 1) % 4] as usize];
                a.x * b.y - b.x * a.y
            })
            .sum()
    }

    /// Returns true if every quad references valid, distinct points.
    pub fn validate(&self) -> bool {
        let n = self.points.len();
        self.quads
            .iter()
            .all(|q| q.iter().all(|&id| (id as usize) < n) && !has_repeated_id(q))
    }
}
