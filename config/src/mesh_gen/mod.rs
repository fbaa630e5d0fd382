//! Validated mesh-generation settings.
//!
//! Settings are read from a YAML document whose values live under a top-level
//! `mesh:` key. Every value is range-checked at load time so downstream stages
//! can rely on a `MeshGenConfig` being usable as-is.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    AXIS_SNAP_FACTOR, AXIS_SNAP_MIN, INTERFACE_TOLERANCE_FACTOR, INTERFACE_TOLERANCE_MIN,
    MAX_MERGE_DECIMALS, STITCH_TOLERANCE_FACTOR, STITCH_TOLERANCE_MIN,
};

/// Error returned when settings cannot be loaded or are out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The YAML document is malformed or has mistyped values.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A value is outside its accepted range.
    #[error("invalid config value {field}={value}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Offending value, formatted.
        value: String,
        /// Accepted range.
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, value: impl fmt::Display, reason: &'static str) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

/// A physical coordinate axis.
///
/// # Examples
/// ```
/// use config::Axis;
/// assert_eq!(Axis::from_index(2), Some(Axis::Z));
/// assert_eq!(Axis::Y.index(), 1);
/// assert_eq!(Axis::from_index(3), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First coordinate.
    X,
    /// Second coordinate.
    Y,
    /// Third coordinate.
    Z,
}

impl Axis {
    /// All axes in coordinate order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the coordinate index (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Maps a coordinate index back to an axis.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Immutable, validated settings for one mesh-generation run.
///
/// # Examples
/// ```
/// use config::{Axis, MeshGenConfig};
///
/// let cfg = MeshGenConfig::default();
/// assert_eq!(cfg.revolve_axis, Axis::Z);
/// assert!(cfg.validate().is_ok());
///
/// let bad = MeshGenConfig { mesh_size: 0.0, ..MeshGenConfig::default() };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGenConfig {
    /// Physical axis the part revolves about in the output mesh.
    pub revolve_axis: Axis,
    /// Sweep angle in degrees.
    pub revolve_angle: f64,
    /// Number of angular node layers produced by the revolution.
    pub revolve_layers: u32,
    /// Target element edge length.
    pub mesh_size: f64,
    /// Output element order (1 = linear).
    pub element_order: u32,
    /// R_core as a fraction of the profile's maximum radius.
    pub ogrid_core_ratio: f64,
    /// Inner block size as a fraction of R_core.
    pub core_inner_ratio: f64,
    /// Radial O-grid layers in the core annulus (0 = automatic).
    pub core_radial_layers: u32,
    /// Radial grading exponent; values above 1 cluster layers outward.
    pub radial_mapping_beta: f64,
    /// Starting decimal rounding for duplicate-point merging.
    pub merge_decimals: u32,
    /// Rotation in degrees applied to the core about the axial direction
    /// before stitching.
    pub core_theta_offset_deg: f64,
}

impl Default for MeshGenConfig {
    fn default() -> Self {
        Self {
            revolve_axis: Axis::Z,
            revolve_angle: 90.0,
            revolve_layers: 16,
            mesh_size: 0.5,
            element_order: 1,
            ogrid_core_ratio: 0.1,
            core_inner_ratio: 0.35,
            core_radial_layers: 0,
            radial_mapping_beta: 2.0,
            merge_decimals: 5,
            core_theta_offset_deg: 0.0,
        }
    }
}

impl MeshGenConfig {
    /// Loads and validates settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parses and validates settings from YAML text.
    ///
    /// A document without a `mesh:` section, or an empty document, yields the
    /// defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.mesh.unwrap_or_default().try_into()
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.revolve_angle > 0.0 && self.revolve_angle <= 360.0) {
            return Err(ConfigError::invalid(
                "revolve_angle",
                self.revolve_angle,
                "must be in (0, 360]",
            ));
        }
        if self.revolve_layers < 1 {
            return Err(ConfigError::invalid(
                "revolve_layers",
                self.revolve_layers,
                "must be >= 1",
            ));
        }
        if !(self.mesh_size.is_finite() && self.mesh_size > 0.0) {
            return Err(ConfigError::invalid("mesh_size", self.mesh_size, "must be > 0"));
        }
        if self.element_order < 1 {
            return Err(ConfigError::invalid(
                "element_order",
                self.element_order,
                "must be >= 1",
            ));
        }
        if !(self.ogrid_core_ratio > 0.0 && self.ogrid_core_ratio < 1.0) {
            return Err(ConfigError::invalid(
                "ogrid_core_ratio",
                self.ogrid_core_ratio,
                "must be in (0, 1)",
            ));
        }
        if !(self.core_inner_ratio > 0.0 && self.core_inner_ratio < 1.0) {
            return Err(ConfigError::invalid(
                "core_inner_ratio",
                self.core_inner_ratio,
                "must be in (0, 1)",
            ));
        }
        if !(self.radial_mapping_beta.is_finite() && self.radial_mapping_beta > 0.0) {
            return Err(ConfigError::invalid(
                "radial_mapping_beta",
                self.radial_mapping_beta,
                "must be > 0",
            ));
        }
        if self.merge_decimals > MAX_MERGE_DECIMALS {
            return Err(ConfigError::invalid(
                "merge_decimals",
                self.merge_decimals,
                "must be in [0, 12]",
            ));
        }
        if !self.core_theta_offset_deg.is_finite() {
            return Err(ConfigError::invalid(
                "core_theta_offset_deg",
                self.core_theta_offset_deg,
                "must be finite",
            ));
        }
        Ok(())
    }

    /// Radial tolerance used to sample the ring's interface axial layering.
    #[inline]
    pub fn interface_tolerance(&self) -> f64 {
        INTERFACE_TOLERANCE_MIN.max(self.mesh_size * INTERFACE_TOLERANCE_FACTOR)
    }

    /// Radial tolerance used to classify interface nodes while stitching.
    #[inline]
    pub fn stitch_tolerance(&self) -> f64 {
        STITCH_TOLERANCE_MIN.max(self.mesh_size * STITCH_TOLERANCE_FACTOR)
    }

    /// Radius below which merged nodes are snapped onto the axial axis.
    #[inline]
    pub fn axis_snap_tolerance(&self) -> f64 {
        AXIS_SNAP_MIN.max(self.mesh_size * AXIS_SNAP_FACTOR)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    mesh: Option<RawMeshSection>,
}

/// Untyped view of the `mesh:` section; signed integers so negative inputs
/// reach validation instead of failing to parse.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawMeshSection {
    revolve_axis: i64,
    revolve_angle: f64,
    revolve_layers: i64,
    mesh_size: f64,
    #[serde(alias = "mesh_dimension")]
    element_order: i64,
    ogrid_core_ratio: f64,
    core_inner_ratio: f64,
    core_radial_layers: i64,
    radial_mapping_beta: f64,
    merge_decimals: i64,
    core_theta_offset_deg: f64,
}

impl Default for RawMeshSection {
    fn default() -> Self {
        let d = MeshGenConfig::default();
        Self {
            revolve_axis: d.revolve_axis.index() as i64,
            revolve_angle: d.revolve_angle,
            revolve_layers: i64::from(d.revolve_layers),
            mesh_size: d.mesh_size,
            element_order: i64::from(d.element_order),
            ogrid_core_ratio: d.ogrid_core_ratio,
            core_inner_ratio: d.core_inner_ratio,
            core_radial_layers: i64::from(d.core_radial_layers),
            radial_mapping_beta: d.radial_mapping_beta,
            merge_decimals: i64::from(d.merge_decimals),
            core_theta_offset_deg: d.core_theta_offset_deg,
        }
    }
}

fn to_count(field: &'static str, value: i64, minimum: i64, reason: &'static str) -> Result<u32, ConfigError> {
    if value < minimum {
        return Err(ConfigError::invalid(field, value, reason));
    }
    u32::try_from(value).map_err(|_| ConfigError::invalid(field, value, "too large"))
}

impl TryFrom<RawMeshSection> for MeshGenConfig {
    type Error = ConfigError;

    fn try_from(raw: RawMeshSection) -> Result<Self, Self::Error> {
        let revolve_axis = Axis::from_index(raw.revolve_axis).ok_or_else(|| {
            ConfigError::invalid("revolve_axis", raw.revolve_axis, "must be 0, 1, or 2")
        })?;
        let cfg = Self {
            revolve_axis,
            revolve_angle: raw.revolve_angle,
            revolve_layers: to_count("revolve_layers", raw.revolve_layers, 1, "must be >= 1")?,
            mesh_size: raw.mesh_size,
            element_order: to_count("element_order", raw.element_order, 1, "must be >= 1")?,
            ogrid_core_ratio: raw.ogrid_core_ratio,
            core_inner_ratio: raw.core_inner_ratio,
            core_radial_layers: to_count(
                "core_radial_layers",
                raw.core_radial_layers,
                0,
                "must be >= 0",
            )?,
            radial_mapping_beta: raw.radial_mapping_beta,
            merge_decimals: to_count("merge_decimals", raw.merge_decimals, 0, "must be in [0, 12]")?,
            core_theta_offset_deg: raw.core_theta_offset_deg,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
