//! # Ring Path
//!
//! Turns the outer ring surfaces into hexahedra:
//! - **mesher**: structured quad meshing of the outer surfaces
//! - **orient**: canonical CCW winding of the (R, A) section
//! - **revolve**: sweep about the canonical axial axis

mod mesher;
mod orient;
mod revolve;


pub use mesher::StructuredRingMesher;
pub use orient::orient_quads_ccw;
pub use revolve::{angular_stations, revolve_section, RevolveParams};
