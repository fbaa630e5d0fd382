//! # Config Crate
//!
//! Centralized tolerances and validated settings for the axisymmetric
//! O-grid hexahedral mesh generator. All magic numbers used by the meshing
//! stages are defined here so the engine never carries inline literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CURVE_SAMPLES, INNER_BLOCK_SAFETY_SCALE};
//! use config::MeshGenConfig;
//!
//! let cfg = MeshGenConfig::from_yaml_str("mesh:\n  revolve_layers: 4\n").unwrap();
//! assert_eq!(cfg.revolve_layers, 4);
//! assert!(CURVE_SAMPLES >= 2);
//! assert!(INNER_BLOCK_SAFETY_SCALE < 1.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every tolerance is defined once
//! - **Validated Eagerly**: a `MeshGenConfig` that exists is in range
//! - **Immutable**: stages receive the config by reference and never mutate it

pub mod constants;
pub mod mesh_gen;

pub use mesh_gen::{Axis, ConfigError, MeshGenConfig};

#[cfg(test)]
mod tests;
