//! # Configuration Constants
//!
//! Centralized tolerances for the O-grid mesh generator. Geometry analysis,
//! core construction, stitching and repair all read their thresholds from here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Geometry Analysis**: Planarity, classification and curve sampling
//! - **Core Construction**: Inner block sizing and degenerate fallbacks
//! - **Interface**: Layer extraction, snapping and stitching factors
//! - **Merging**: Duplicate-point rounding limits

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-13));
/// ```
pub const EPSILON: f64 = 1e-12;

/// Tolerance used when comparing a sweep angle in degrees against a
/// supported value (e.g. the 90° restriction of the structured core).
///
/// # Example
///
/// ```rust
/// use config::constants::{ANGLE_TOLERANCE_DEG, SUPPORTED_CORE_SWEEP_DEG};
///
/// let sweep = 90.0 + 1e-9;
/// assert!((sweep - SUPPORTED_CORE_SWEEP_DEG).abs() <= ANGLE_TOLERANCE_DEG);
/// ```
pub const ANGLE_TOLERANCE_DEG: f64 = 1e-6;

// =============================================================================
// GEOMETRY ANALYSIS CONSTANTS
// =============================================================================

/// Maximum bounding-box extent of the profile plane normal.
///
/// A profile whose thinnest dimension is thicker than this is not planar and
/// cannot be treated as a 2D axisymmetric section.
///
/// # Example
///
/// ```rust
/// use config::constants::PLANARITY_EPSILON;
///
/// let extents = [10.0, 2.0, 0.0];
/// let thinnest = extents.iter().cloned().fold(f64::INFINITY, f64::min);
/// assert!(thinnest <= PLANARITY_EPSILON);
/// ```
pub const PLANARITY_EPSILON: f64 = 1e-6;

/// Radial tolerance used when classifying split surfaces as inner or outer.
pub const SURFACE_SPLIT_TOLERANCE: f64 = 1e-5;

/// Radial tolerance used to recognise boundary curves lying on the interface
/// (|r| ≈ R_core) or on the axis (|r| ≈ 0).
///
/// # Example
///
/// ```rust
/// use config::constants::CURVE_CLASSIFY_TOLERANCE;
///
/// let r_core: f64 = 1.0;
/// let (r0, r1): (f64, f64) = (1.00001, 0.99999);
/// let on_interface = (r0 - r_core).abs() < CURVE_CLASSIFY_TOLERANCE
///     && (r1 - r_core).abs() < CURVE_CLASSIFY_TOLERANCE;
/// assert!(on_interface);
/// ```
pub const CURVE_CLASSIFY_TOLERANCE: f64 = 1e-4;

/// Number of evenly spaced samples taken along each inner boundary curve.
pub const CURVE_SAMPLES: usize = 41;

/// Minimum number of samples each of the top and bottom groups must hold.
pub const MIN_PROFILE_GROUP_SAMPLES: usize = 2;

/// Smallest axial margin added to each end of the auxiliary cut line.
pub const CUT_LINE_MIN_MARGIN: f64 = 1.0;

/// Axial margin of the cut line as a fraction of the profile's axial extent.
///
/// # Example
///
/// ```rust
/// use config::constants::{CUT_LINE_MARGIN_FRACTION, CUT_LINE_MIN_MARGIN};
///
/// let axial_extent = 100.0;
/// let margin = CUT_LINE_MIN_MARGIN.max(CUT_LINE_MARGIN_FRACTION * axial_extent);
/// assert_eq!(margin, 5.0);
/// ```
pub const CUT_LINE_MARGIN_FRACTION: f64 = 0.05;

/// Radius below which a profile sample already counts as lying at R = 0.
pub const PROFILE_ORIGIN_EPSILON: f64 = 1e-8;

/// Decimal places used to collapse near-duplicate radii in a profile
/// interpolant before averaging their axial values.
pub const PROFILE_DEDUP_DECIMALS: i32 = 12;

/// Decimal places used to recognise the same polygon edge shared by two
/// profile faces.
pub const KERNEL_VERTEX_DECIMALS: i32 = 9;

/// Pieces produced by clipping a face whose area falls below this fraction
/// of the squared face diameter are discarded.
pub const CLIP_AREA_FRACTION: f64 = 1e-12;

// =============================================================================
// RING MESHING CONSTANTS
// =============================================================================

/// Relative tolerance (× surface width) for treating a boundary segment as
/// lying on a radial sampling station.
pub const STATION_TOLERANCE_FACTOR: f64 = 1e-9;

/// Angular step (degrees) at or beyond which a revolved cell folds back on
/// itself; `revolve_section` rejects steps this large.
pub const MAX_ANGULAR_STEP_DEG: f64 = 180.0;

// =============================================================================
// CORE CONSTRUCTION CONSTANTS
// =============================================================================

/// Safety scale keeping the inner block corner strictly inside the circle.
///
/// # Example
///
/// ```rust
/// use config::constants::INNER_BLOCK_SAFETY_SCALE;
///
/// let radius = 3.0;
/// let half_width = 4.0_f64;
/// let scale = (INNER_BLOCK_SAFETY_SCALE * radius / half_width).min(1.0);
/// assert!(half_width * scale < radius);
/// ```
pub const INNER_BLOCK_SAFETY_SCALE: f64 = 0.98;

/// Lower clamp applied to the inner block ratio.
pub const MIN_INNER_RATIO: f64 = 1e-6;

/// Upper clamp applied to the inner block ratio.
pub const MAX_INNER_RATIO: f64 = 0.95;

/// Clamp range for the split-ray tangent used to size the inner block.
pub const MIN_SPLIT_TANGENT: f64 = 1e-9;

/// Upper clamp for the split-ray tangent.
pub const MAX_SPLIT_TANGENT: f64 = 1e9;

/// Relative thickness of the single quad returned for a degenerate core.
///
/// # Example
///
/// ```rust
/// use config::constants::DEGENERATE_THICKNESS_FACTOR;
///
/// let radius = 2.0;
/// let thickness = (radius * DEGENERATE_THICKNESS_FACTOR).max(DEGENERATE_THICKNESS_FACTOR);
/// assert!(thickness > 0.0 && thickness < 1e-6);
/// ```
pub const DEGENERATE_THICKNESS_FACTOR: f64 = 1e-9;

/// Minimum number of radial O-grid layers.
pub const MIN_RADIAL_LAYERS: u32 = 2;

/// Sweep angle in degrees the structured core supports.
pub const SUPPORTED_CORE_SWEEP_DEG: f64 = 90.0;

/// Fewest angular node layers the structured core accepts: two angular
/// divisions, so both edges of the inner block carry at least one station.
pub const MIN_CORE_REVOLVE_LAYERS: u32 = 3;

/// Relative radius tolerance used to detect core boundary nodes (× R_core)
/// before snapping them exactly onto the interface circle.
pub const CORE_BOUNDARY_TOLERANCE_FACTOR: f64 = 0.01;

/// Absolute floor for the core boundary tolerance.
pub const CORE_BOUNDARY_TOLERANCE_MIN: f64 = 1e-6;

// =============================================================================
// INTERFACE CONSTANTS
// =============================================================================

/// Interface sampling tolerance as a fraction of mesh size.
pub const INTERFACE_TOLERANCE_FACTOR: f64 = 0.05;

/// Absolute floor for the interface sampling tolerance.
pub const INTERFACE_TOLERANCE_MIN: f64 = 1e-6;

/// Decimal places used to de-duplicate interface axial positions.
///
/// # Example
///
/// ```rust
/// use config::constants::INTERFACE_LAYER_DECIMALS;
///
/// let scale = 10f64.powi(INTERFACE_LAYER_DECIMALS);
/// let a = (0.50001_f64 * scale).round() / scale;
/// let b = (0.49999_f64 * scale).round() / scale;
/// assert_eq!(a, b);
/// ```
pub const INTERFACE_LAYER_DECIMALS: i32 = 4;

/// Stitch radial classification tolerance as a fraction of mesh size.
pub const STITCH_TOLERANCE_FACTOR: f64 = 1e-3;

/// Absolute floor for the stitch radial tolerance.
pub const STITCH_TOLERANCE_MIN: f64 = 1e-4;

/// Multiple of the radial tolerance within which a ring interface node is
/// accepted as coincident with its nearest core interface node.
pub const STITCH_MATCH_FACTOR: f64 = 5.0;

/// Absolute floor for the stitch match distance.
pub const STITCH_MATCH_MIN: f64 = 1e-9;

/// Divisor applied to the expected angular step to obtain the theta-layer
/// bucketing resolution.
///
/// # Example
///
/// ```rust
/// use config::constants::THETA_RESOLUTION_DIVISOR;
///
/// let step = std::f64::consts::FRAC_PI_2 / 4.0;
/// let resolution = step / THETA_RESOLUTION_DIVISOR;
/// assert!(resolution < step);
/// ```
pub const THETA_RESOLUTION_DIVISOR: f64 = 10.0;

/// Absolute floor for the theta-layer bucketing resolution (radians).
pub const THETA_RESOLUTION_MIN: f64 = 1e-6;

/// Near-axis snap tolerance as a fraction of mesh size.
pub const AXIS_SNAP_FACTOR: f64 = 1e-6;

/// Absolute floor for the near-axis snap tolerance.
pub const AXIS_SNAP_MIN: f64 = 1e-12;

// =============================================================================
// MERGING CONSTANTS
// =============================================================================

/// Finest rounding tried by the duplicate-point merge backoff.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_MERGE_DECIMALS;
///
/// let attempts: Vec<u32> = (5..=MAX_MERGE_DECIMALS).collect();
/// assert_eq!(attempts.len(), 8);
/// ```
pub const MAX_MERGE_DECIMALS: u32 = 12;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Rounds a value to the given number of decimal places.
///
/// # Example
///
/// ```rust
/// use config::constants::round_to_decimals;
///
/// assert_eq!(round_to_decimals(1.23456, 2), 1.23);
/// ```
#[inline]
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-13));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
