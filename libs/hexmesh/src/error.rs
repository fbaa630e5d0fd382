//! # Mesh Errors
//!
//! Error taxonomy for the meshing pipeline.
//!
//! ## Error Policy
//!
//! - Configuration, geometry, generation and integrity failures abort the run
//! - Recoverable anomalies are logged as warnings, never returned as errors
//! - No output is written once an error has been raised

use thiserror::Error;

/// Errors that can occur while generating a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Out-of-range or unreadable settings.
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Non-planar profile, missing boundary curves or degenerate top/bottom split.
    #[error("Geometry error: {message}")]
    Geometry { message: String },

    /// A stage could not produce usable cells or interface nodes.
    #[error("Mesh generation error: {message}")]
    MeshGeneration { message: String },

    /// Hexahedra remained inverted after the repair pass.
    #[error("Mesh integrity error ({label}): attempted to fix {attempted} inverted hexahedra, {remaining} still inverted")]
    MeshIntegrity {
        /// Stage that was being repaired.
        label: String,
        /// Number of cells that were flipped.
        attempted: usize,
        /// Number of cells still non-positive after flipping.
        remaining: usize,
    },

    /// A requested feature is outside what the structured core supports.
    #[error("Not implemented: {message}")]
    NotImplemented { message: String },

    /// Output could not be serialized.
    #[error("Export error: {message}")]
    Export { message: String },

    /// I/O failure while reading a profile or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates a geometry error.
    pub fn geometry(message: impl Into<String>) -> Self {
        Self::Geometry {
            message: message.into(),
        }
    }

    /// Creates a mesh generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::MeshGeneration {
            message: message.into(),
        }
    }

    /// Creates a not-implemented error.
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented {
            message: message.into(),
        }
    }

    /// Creates an export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}

/// Result type alias for meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;
