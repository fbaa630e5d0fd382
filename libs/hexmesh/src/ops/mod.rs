//! # Mesh Operations
//!
//! The stages between geometry analysis and export:
//!
//! - **ring**: quad orientation, structured ring meshing and revolution
//! - **ogrid**: quarter O-grid cross-section and profile-following extrusion
//! - **stitch**: theta-layer alignment and conformal index merge
//! - **repair**: inverted hexahedron detection and fixing
//! - **canonical**: rotation about the axial axis and output axis permutation
//! - **merge**: duplicate-point merging with rounding backoff

pub mod canonical;
pub mod ogrid;
pub mod merge;
pub mod repair;
pub mod ring;
pub mod stitch;

pub use canonical::{rotate_about_axial, snap_near_axis, AxisPermutation};
pub use merge::{merge_duplicate_points, merge_duplicate_points_with_backoff, MergeOutcome};
pub use repair::{count_inverted_hexes, fix_inverted_hexes, hex_signed_volume};
