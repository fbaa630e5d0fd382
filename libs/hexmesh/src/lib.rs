//! # Hexmesh
//!
//! Conformal hexahedral meshing of axisymmetric parts from a planar profile.
//!
//! ## Architecture
//!
//! ```text
//! profile → geometry (axes, split, A_bot/A_top, ring quads)
//!         → ops::ring (revolve)  +  ops::ogrid (core O-grid, extrude)
//!         → ops::stitch → ops::repair → ops::canonical → export
//! ```
//!
//! The working frame carries the axial direction on the second coordinate
//! and R = hypot(x, z); the output axis is applied only at the very end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let report = hexmesh::generate(
//!     Path::new("configs/shaft.yaml"),
//!     Path::new("profiles/shaft.json"),
//!     None,
//! )?;
//! println!("{} nodes, {} elements", report.nodes, report.elements);
//! # Ok::<(), hexmesh::MeshError>(())
//! ```

pub mod error;
pub mod export;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod pipeline;

pub use error::{MeshError, MeshResult};
pub use mesh::{CellKind, Mesh, QuadMesh2d};
pub use pipeline::{build_mesh, generate, generate_with, GenerationReport};
