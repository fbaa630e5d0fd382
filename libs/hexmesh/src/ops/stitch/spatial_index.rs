//! # Point Index
//!
//! R-tree over node positions for nearest-node lookups during stitching.

use glam::DVec3;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A node position tagged with its mesh id.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedNode {
    position: [f64; 3],
    id: u32,
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedNode {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Nearest-neighbour index over a subset of mesh nodes.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hexmesh::ops::stitch::PointIndex;
///
/// let index = PointIndex::new([(7, DVec3::ZERO), (9, DVec3::X)]);
/// let (id, dist) = index.nearest(DVec3::new(0.9, 0.0, 0.0)).unwrap();
/// assert_eq!(id, 9);
/// assert!((dist - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct PointIndex {
    tree: RTree<IndexedNode>,
}

impl PointIndex {
    /// Bulk-loads `(id, position)` pairs.
    pub fn new<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = (u32, DVec3)>,
    {
        let entries = nodes
            .into_iter()
            .map(|(id, p)| IndexedNode {
                position: p.to_array(),
                id,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns true if no node is indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Id of the node nearest to `query` and its Euclidean distance.
    pub fn nearest(&self, query: DVec3) -> Option<(u32, f64)> {
        let q = query.to_array();
        self.tree
            .nearest_neighbor(&q)
            .map(|node| (node.id, node.distance_2(&q).sqrt()))
    }
}
