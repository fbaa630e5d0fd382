//! # Interface Stitching
//!
//! Joins the extruded core and the revolved ring into one conformal mesh at
//! r = R_core in two phases:
//!
//! 1. **Layer alignment** ([`align_interface_layers`]): interface nodes on
//!    both sides are grouped into theta layers and core coordinates are
//!    overwritten rank-for-rank with the paired ring coordinates
//! 2. **Index merge** ([`stitch_conformal`]): every ring interface node is
//!    matched to its nearest core interface node and ring cells are remapped
//!    onto the shared ids
//!
//! Mismatches in either phase are logged and tolerated; only a side without
//! any interface nodes is fatal.

mod conformal;
mod spatial_index;
mod theta_layers;


pub use conformal::{stitch_conformal, StitchReport};
pub use spatial_index::PointIndex;
pub use theta_layers::{
    align_interface_layers, group_theta_layers, interface_nodes, LayerAlignment, ThetaLayer,
};
