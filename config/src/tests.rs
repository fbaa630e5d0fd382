//! # Tests for the Config Crate
//!
//! Cross-module checks between the constants and the validated settings.

use crate::constants::*;
use crate::MeshGenConfig;

// =============================================================================
// TOLERANCE ORDERING
// =============================================================================

#[test]
fn test_stitch_match_radius_exceeds_classification_radius() {
    let cfg = MeshGenConfig::default();
    let tol_r = cfg.stitch_tolerance();
    assert!(tol_r * STITCH_MATCH_FACTOR > tol_r);
}

#[test]
fn test_interface_tolerance_is_coarser_than_stitch_tolerance() {
    // Interface sampling must catch every node the stitcher will later classify.
    let cfg = MeshGenConfig::default();
    assert!(cfg.interface_tolerance() >= cfg.stitch_tolerance());
}

#[test]
fn test_default_merge_decimals_within_backoff_range() {
    let cfg = MeshGenConfig::default();
    assert!(cfg.merge_decimals <= MAX_MERGE_DECIMALS);
}

#[test]
fn test_axis_snap_tolerance_is_tiny() {
    let cfg = MeshGenConfig::default();
    assert!(cfg.axis_snap_tolerance() < cfg.stitch_tolerance());
}
