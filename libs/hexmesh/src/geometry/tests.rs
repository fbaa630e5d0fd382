//! # Geometry Tests
//!
//! Axis detection, profile interpolants and the full split of a profile into
//! core boundary functions and a meshed outer ring.

use super::*;
use crate::error::MeshError;
use crate::mesh::CellKind;
use crate::ops::ring::StructuredRingMesher;
use approx::assert_abs_diff_eq;
use config::{Axis, MeshGenConfig};
use glam::DVec3;

fn rectangle(x0: f64, x1: f64, y0: f64, y1: f64) -> ProfileDocument {
    ProfileDocument::new(vec![ProfileFace::new(vec![
        DVec3::new(x0, y0, 0.0),
        DVec3::new(x1, y0, 0.0),
        DVec3::new(x1, y1, 0.0),
        DVec3::new(x0, y1, 0.0),
    ])])
}

fn config() -> MeshGenConfig {
    MeshGenConfig {
        revolve_axis: Axis::Y,
        revolve_layers: 4,
        mesh_size: 0.5,
        ..MeshGenConfig::default()
    }
}

// =============================================================================
// AXIS DETECTION
// =============================================================================

#[test]
fn test_detect_axes_for_each_plane() {
    let xz = Aabb::new(DVec3::ZERO, DVec3::new(4.0, 0.0, 3.0));
    let axes = detect_profile_axes(&xz, Axis::Z).unwrap();
    assert_eq!((axes.radial_dim, axes.axial_dim, axes.normal_dim), (0, 2, 1));

    let yz = Aabb::new(DVec3::ZERO, DVec3::new(0.0, 4.0, 3.0));
    let axes = detect_profile_axes(&yz, Axis::Y).unwrap();
    assert_eq!((axes.radial_dim, axes.axial_dim, axes.normal_dim), (2, 1, 0));
}

#[test]
fn test_detect_axes_rejects_thick_profile() {
    let solid = Aabb::new(DVec3::ZERO, DVec3::new(1.0, 1.0, 0.5));
    let err = detect_profile_axes(&solid, Axis::Y).unwrap_err();
    assert!(matches!(err, MeshError::Geometry { .. }));
}

#[test]
fn test_detect_axes_rejects_axis_along_normal() {
    let flat = Aabb::new(DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));
    assert!(detect_profile_axes(&flat, Axis::Z).is_err());
}

// =============================================================================
// BOUNDING BOXES
// =============================================================================

#[test]
fn test_aabb_from_points_and_ranges() {
    assert!(Aabb::from_points(std::iter::empty()).is_none());
    let b = Aabb::from_points([DVec3::new(-2.0, 1.0, 0.0), DVec3::new(3.0, -1.0, 0.0)]).unwrap();
    assert_eq!(b.range(0), (-2.0, 3.0));
    assert_eq!(b.abs_range(0), (0.0, 3.0));
    assert_eq!(b.extent(), DVec3::new(5.0, 2.0, 0.0));

    let right = Aabb::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(4.0, 1.0, 0.0));
    assert_eq!(right.abs_range(0), (1.0, 4.0));
    let left = Aabb::new(DVec3::new(-4.0, 0.0, 0.0), DVec3::new(-1.0, 1.0, 0.0));
    assert_eq!(left.abs_range(0), (1.0, 4.0));
    assert_eq!(right.union(&left).range(0), (-4.0, 4.0));
}

// =============================================================================
// PROFILE CURVES
// =============================================================================

#[test]
fn test_profile_curve_averages_duplicates() {
    let curve = ProfileCurve::from_samples(&[(1.0, 2.0), (1.0 + 1e-14, 4.0), (2.0, 5.0)]);
    assert_eq!(curve.sample_count(), 2);
    assert_eq!(curve.values()[0], 3.0);
}

#[test]
fn test_profile_curve_anchored_extrapolates_to_axis() {
    let curve = ProfileCurve::from_samples(&[(1.0, 3.0), (2.0, 4.0)]).anchored_at_axis();
    assert_eq!(curve.radii()[0], 0.0);
    assert_abs_diff_eq!(curve.eval(0.0), 2.0, epsilon = 1e-12);

    let single = ProfileCurve::from_samples(&[(1.5, 7.0)]).anchored_at_axis();
    assert_eq!(single.eval(0.0), 7.0);

    let already = ProfileCurve::from_samples(&[(0.0, 1.0), (2.0, 4.0)]).anchored_at_axis();
    assert_eq!(already.sample_count(), 2);
}

#[test]
fn test_profile_curve_clamps_and_handles_empty() {
    let curve = ProfileCurve::from_samples(&[(0.0, 1.0), (2.0, 3.0)]);
    assert_eq!(curve.eval(100.0), 3.0);
    assert_eq!(curve.eval(-1.0), 1.0);
    assert_eq!(curve.eval(f64::NAN), 1.0);
    assert_eq!(ProfileCurve::default().eval(1.0), 0.0);

    let filtered = ProfileCurve::from_samples(&[(f64::NAN, 1.0), (1.0, f64::INFINITY)]);
    assert_eq!(filtered.sample_count(), 0);
}

// =============================================================================
// ANALYSIS
// =============================================================================

#[test]
fn test_analyze_rectangle() {
    let mut session = PolygonSession::from_document(rectangle(0.0, 10.0, 0.0, 2.0)).unwrap();
    let split = analyze_session(&mut session, &StructuredRingMesher::default(), &config()).unwrap();

    assert_abs_diff_eq!(split.r_core, 1.0, epsilon = 1e-12);
    assert_eq!(
        (split.axes.radial_dim, split.axes.axial_dim, split.axes.normal_dim),
        (0, 1, 2)
    );
    assert_eq!(split.ring.kind(), CellKind::Quad4);
    assert_eq!(split.ring.point_count(), 19 * 5);
    assert_eq!(split.ring.cell_count(), 18 * 4);

    for r in [0.0, 0.5, 1.0, 50.0] {
        assert_abs_diff_eq!(split.a_bot.eval(r), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(split.a_top.eval(r), 2.0, epsilon = 1e-9);
    }

    let section = split.ring_section();
    assert_eq!(section.point_count(), split.ring.point_count());
    assert!(section.points.iter().all(|p| p.x >= 1.0 - 1e-12));
}

#[test]
fn test_analyze_negative_side_profile() {
    let mut session = PolygonSession::from_document(rectangle(-10.0, 0.0, 0.0, 2.0)).unwrap();
    let split = analyze_session(&mut session, &StructuredRingMesher::default(), &config()).unwrap();
    assert_abs_diff_eq!(split.r_core, 1.0, epsilon = 1e-12);
    assert!(split.ring_section().points.iter().all(|p| p.x >= 1.0 - 1e-12));
    assert_abs_diff_eq!(split.a_top.eval(0.5), 2.0, epsilon = 1e-9);
}

#[test]
fn test_analyze_is_deterministic() {
    let run = || {
        let mut session = PolygonSession::from_document(rectangle(0.0, 8.0, -1.0, 3.0)).unwrap();
        analyze_session(&mut session, &StructuredRingMesher::default(), &config()).unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.r_core, b.r_core);
    assert_eq!(a.a_bot.sample_count(), b.a_bot.sample_count());
    assert_eq!(a.a_top.sample_count(), b.a_top.sample_count());
    assert_eq!(a.ring, b.ring);
}

#[test]
fn test_analyze_rejects_thick_profile() {
    let doc = ProfileDocument::new(vec![ProfileFace::new(vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(4.0, 0.0, 1.0),
        DVec3::new(4.0, 2.0, 2.0),
        DVec3::new(0.0, 2.0, 1.0),
    ])]);
    let mut session = PolygonSession::from_document(doc).unwrap();
    let err = analyze_session(&mut session, &StructuredRingMesher::default(), &config()).unwrap_err();
    assert!(matches!(err, MeshError::Geometry { .. }));
}

#[test]
fn test_analyze_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, rectangle(0.0, 10.0, 0.0, 2.0).to_json_string().unwrap()).unwrap();

    let split =
        analyze_geometry_and_split(&PolygonKernel, &StructuredRingMesher::default(), &path, &config())
            .unwrap();
    assert_eq!(split.ring.cell_count(), 72);

    let missing = dir.path().join("missing.json");
    let err = analyze_geometry_and_split(&PolygonKernel, &StructuredRingMesher::default(), &missing, &config())
        .unwrap_err();
    assert!(matches!(err, MeshError::Io(_)));
}
