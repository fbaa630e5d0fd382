//! # Core O-Grid
//!
//! The solid core inside R_core cannot be revolved (every node on the axis
//! would collapse), so it is meshed directly in the (x, z) plane as a quarter
//! O-grid and extruded along the axial direction:
//!
//! - **section**: inner structured block plus graded annulus out to R_core
//! - **extrude**: profile-following axial layering of the cross-section
//! - **layers**: axial interface positions sampled from the revolved ring
//!
//! ## Layout
//!
//! ```text
//!   z
//!   |‾‾‾‾‾‾-.
//!   |  upper  `.       outer arc r = R_core, θ ∈ [0, sweep]
//!   |_____      \
//!   |inner|      |
//!   |block| lower|
//!   |_____|______|__ x
//! ```

mod extrude;
mod layers;
mod section;

#[cfg(test)]
mod tests;

pub use extrude::extrude_core;
pub use layers::interface_axial_positions;
pub use section::{create_quarter_ogrid, CoreSection, InnerBlock, OGridParams};
