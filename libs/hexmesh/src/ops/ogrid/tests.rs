//! # Core O-Grid Tests

use super::*;
use crate::error::MeshError;
use crate::geometry::ProfileCurve;
use crate::mesh::{CellKind, Mesh};
use crate::ops::repair::{count_inverted_hexes, fix_inverted_hexes};
use crate::ops::ring::angular_stations;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use glam::DVec3;

fn params(radius: f64, n_lower: u32, n_upper: u32) -> OGridParams {
    OGridParams {
        radius,
        n_lower,
        n_upper,
        sweep_deg: 90.0,
        inner_ratio: 0.35,
        radial_layers: 0,
        beta: 2.0,
        flip_winding: false,
    }
}

fn flat(value: f64) -> ProfileCurve {
    ProfileCurve::from_samples(&[(0.0, value), (10.0, value)])
}

// =============================================================================
// CROSS-SECTION
// =============================================================================

#[test]
fn test_degenerate_section() {
    for flip in [false, true] {
        let mut p = params(2.0, 0, 0);
        p.flip_winding = flip;
        let core = create_quarter_ogrid(&p);
        assert_eq!(core.section.point_count(), 4);
        assert_eq!(core.section.quad_count(), 1);
        assert!(core.inner.is_none());
        let area = core.section.signed_area2(&core.section.quads[0]);
        assert_eq!(area > 0.0, !flip);
    }
}

#[test]
fn test_inner_block_area_before_safety_scale() {
    // Outer radius 10 with core ratio 0.3.
    let core = create_quarter_ogrid(&params(3.0, 1, 2));
    let block = core.inner.unwrap();
    let expected = (0.35f64 * 3.0).powi(2);
    assert_relative_eq!(block.unscaled_area, expected, max_relative = 0.02);
    assert!(block.scale <= 1.0);
    assert!(block.width_x < 3.0 && block.width_z < 3.0);
}

#[test]
fn test_section_counts() {
    let core = create_quarter_ogrid(&params(1.0, 1, 2));
    // Inner block 3x2 nodes, 4 stations x 2 radial layers.
    assert_eq!(core.radial_layers, 2);
    assert_eq!(core.section.point_count(), 6 + 8);
    assert_eq!(core.section.quad_count(), 2 + 6);
    assert!(core.section.validate());
}

#[test]
fn test_section_is_ccw_unless_flipped() {
    let mut p = params(1.0, 3, 4);
    let core = create_quarter_ogrid(&p);
    assert!(core
        .section
        .quads
        .iter()
        .all(|q| core.section.signed_area2(q) > 0.0));

    p.flip_winding = true;
    let flipped = create_quarter_ogrid(&p);
    assert!(flipped
        .section
        .quads
        .iter()
        .all(|q| flipped.section.signed_area2(q) < 0.0));
}

#[test]
fn test_outer_arc_matches_revolution_stations() {
    let p = params(1.5, 3, 4);
    let core = create_quarter_ogrid(&p);
    let thetas = angular_stations(90.0, p.divisions() + 1);
    let outer: Vec<_> = core
        .section
        .points
        .iter()
        .filter(|q| (q.length() - 1.5).abs() < 1e-9)
        .collect();
    assert_eq!(outer.len(), thetas.len());
    for q in outer {
        let theta = q.y.atan2(q.x);
        assert!(thetas.iter().any(|t| (t - theta).abs() < 1e-9));
    }
}

#[test]
fn test_explicit_radial_layers_and_grading() {
    let mut p = params(1.0, 1, 1);
    p.radial_layers = 4;
    p.beta = 1.0;
    let core = create_quarter_ogrid(&p);
    assert_eq!(core.radial_layers, 4);
    // Along θ = 0 the annulus spacing is uniform for β = 1.
    let inner_x = core.inner.unwrap().width_x;
    let mut xs: Vec<f64> = core
        .section
        .points
        .iter()
        .filter(|q| q.y.abs() < 1e-12 && q.x >= inner_x - 1e-12)
        .map(|q| q.x)
        .collect();
    xs.sort_by(f64::total_cmp);
    assert_eq!(xs.len(), 5);
    let step = (1.0 - inner_x) / 4.0;
    for w in xs.windows(2) {
        assert_abs_diff_eq!(w[1] - w[0], step, epsilon = 1e-12);
    }
}

// =============================================================================
// EXTRUSION
// =============================================================================

#[test]
fn test_extrusion_counts_and_flip_rule() {
    let mut p = params(1.0, 1, 2);
    p.radial_layers = 2;
    // Positive reference height needs the flipped section.
    p.flip_winding = true;
    let core = create_quarter_ogrid(&p);
    let layers = [0.0, 0.5, 1.0, 1.5, 2.0];
    let mesh = extrude_core(&core.section, &layers, 1.0, &flat(0.0), &flat(2.0)).unwrap();
    assert_eq!(mesh.kind(), CellKind::Hex8);
    assert_eq!(mesh.point_count(), 14 * 5);
    assert_eq!(mesh.cell_count(), 8 * 4);
    assert_eq!(count_inverted_hexes(&mesh), 0);
}

#[test]
fn test_extrusion_follows_curved_profile() {
    let core = create_quarter_ogrid(&OGridParams {
        flip_winding: true,
        ..params(2.0, 1, 1)
    });
    // Top rises linearly from 3 at the axis to 4 at r = 2.
    let a_top = ProfileCurve::from_samples(&[(0.0, 3.0), (2.0, 4.0)]);
    let mesh = extrude_core(&core.section, &[0.0, 4.0], 2.0, &flat(0.0), &a_top).unwrap();
    let np = core.section.point_count();
    for (i, p) in core.section.points.iter().enumerate() {
        let top = mesh.point((np + i) as u32);
        assert_abs_diff_eq!(top.y, 3.0 + p.length() / 2.0, epsilon = 1e-6);
    }
}

#[test]
fn test_extrusion_snaps_boundary_to_circle() {
    let mut section = create_quarter_ogrid(&params(1.0, 1, 1)).section;
    for p in &mut section.points {
        if (p.length() - 1.0).abs() < 1e-9 {
            *p *= 1.0 + 1e-4;
        }
    }
    let mesh = extrude_core(&section, &[0.0, 1.0], 1.0, &flat(1.0), &flat(0.0)).unwrap();
    let on_circle = mesh
        .points()
        .iter()
        .filter(|p| (p.x.hypot(p.z) - 1.0).abs() < 1e-3)
        .all(|p| (p.x.hypot(p.z) - 1.0).abs() < 1e-12);
    assert!(on_circle);
}

#[test]
fn test_extrusion_flat_reference_falls_back_to_uniform() {
    let core = create_quarter_ogrid(&params(1.0, 1, 1));
    let mesh = extrude_core(&core.section, &[5.0, 6.0, 7.0], 1.0, &flat(1.0), &flat(1.0)).unwrap();
    assert_eq!(mesh.point_count(), core.section.point_count() * 3);
}

#[test]
fn test_extrusion_needs_two_layers() {
    let core = create_quarter_ogrid(&params(1.0, 1, 1));
    let err = extrude_core(&core.section, &[0.0], 1.0, &flat(0.0), &flat(1.0)).unwrap_err();
    assert!(matches!(err, MeshError::MeshGeneration { .. }));
}

#[test]
fn test_unflipped_core_is_repaired() {
    let core = create_quarter_ogrid(&params(1.0, 1, 2));
    let mut mesh = extrude_core(&core.section, &[0.0, 1.0], 1.0, &flat(0.0), &flat(1.0)).unwrap();
    let inverted = count_inverted_hexes(&mesh);
    assert_eq!(inverted, mesh.cell_count());
    assert_eq!(fix_inverted_hexes(&mut mesh, "core").unwrap(), inverted);
    assert_eq!(count_inverted_hexes(&mesh), 0);
}

// =============================================================================
// INTERFACE LAYERS
// =============================================================================

fn ring_column(r: f64, ys: &[f64]) -> Mesh {
    let mut mesh = Mesh::new(CellKind::Hex8);
    for &y in ys {
        mesh.add_point(DVec3::new(r, y, 0.0));
        mesh.add_point(DVec3::new(r + 1.0, y, 0.0));
    }
    mesh
}

#[test]
fn test_interface_positions_sorted_and_deduped() {
    let mesh = ring_column(1.0, &[1.0, 0.0, 0.5, 1.0, 0.50001]);
    let layers = interface_axial_positions(&mesh, 1.0, 0.025).unwrap();
    assert_eq!(layers, vec![0.0, 0.5, 1.0]);
}

#[test]
fn test_interface_positions_drop_ghost_layers() {
    let mesh = ring_column(1.0, &[0.0, 0.01, 0.5]);
    let layers = interface_axial_positions(&mesh, 1.0, 0.025).unwrap();
    assert_eq!(layers, vec![0.0, 0.5]);
}

#[test]
fn test_interface_positions_need_two_nodes() {
    let mesh = ring_column(2.0, &[0.0, 1.0]);
    assert!(interface_axial_positions(&mesh, 1.0, 0.025).is_err());
}
