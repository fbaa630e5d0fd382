//! Property-based checks of the winding, repair and tolerance invariants.

use config::{Axis, MeshGenConfig};
use glam::{DVec2, DVec3};
use hexmesh::geometry::ProfileCurve;
use hexmesh::ops::repair::HEX_FLIP;
use hexmesh::ops::ring::{orient_quads_ccw, revolve_section, RevolveParams};
use hexmesh::ops::{count_inverted_hexes, fix_inverted_hexes, AxisPermutation};
use hexmesh::{CellKind, Mesh, QuadMesh2d};
use proptest::prelude::*;

/// Structured `cols x rows` quad strip over `[r0, r0 + cols] x [0, rows]`.
fn grid(r0: f64, cols: u32, rows: u32, flips: &[bool]) -> QuadMesh2d {
    let mut points = Vec::new();
    for j in 0..=rows {
        for i in 0..=cols {
            points.push(DVec2::new(r0 + f64::from(i), f64::from(j)));
        }
    }
    let stride = cols + 1;
    let mut quads = Vec::new();
    for j in 0..rows {
        for i in 0..cols {
            let n0 = j * stride + i;
            let quad = [n0, n0 + 1, n0 + 1 + stride, n0 + stride];
            let flip = flips.get(quads.len()).copied().unwrap_or(false);
            quads.push(if flip {
                [quad[0], quad[3], quad[2], quad[1]]
            } else {
                quad
            });
        }
    }
    QuadMesh2d::new(points, quads)
}

/// A row of unit cubes along x.
fn cube_row(count: u32) -> Mesh {
    let mut mesh = Mesh::new(CellKind::Hex8);
    for i in 0..=count {
        let x = f64::from(i);
        for (y, z) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            mesh.add_point(DVec3::new(x, y, z));
        }
    }
    for i in 0..count {
        let a = 4 * i;
        let b = a + 4;
        // Bottom (z = 0) CCW seen from +z, then top.
        mesh.add_cell(&[a, b, b + 1, a + 1, a + 2, b + 2, b + 3, a + 3]);
    }
    mesh
}

fn axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

proptest! {
    #[test]
    fn orientation_is_idempotent(
        cols in 1u32..6,
        rows in 1u32..6,
        flips in prop::collection::vec(any::<bool>(), 36),
    ) {
        let mut section = grid(1.0, cols, rows, &flips);
        let expected = flips.iter().take((cols * rows) as usize).filter(|f| **f).count();
        prop_assert_eq!(orient_quads_ccw(&mut section), expected);
        prop_assert_eq!(orient_quads_ccw(&mut section), 0);
        prop_assert!(section.quads.iter().all(|q| section.signed_area2(q) > 0.0));
    }

    #[test]
    fn revolved_ccw_sections_have_no_inverted_cells(
        r0 in 0.1f64..5.0,
        cols in 1u32..4,
        rows in 1u32..4,
        step_deg in 5.0f64..179.0,
        layers in 2u32..8,
    ) {
        let angle_deg = (step_deg * f64::from(layers - 1)).min(350.0);
        let section = grid(r0, cols, rows, &[]);
        let mesh = revolve_section(&section, &RevolveParams { angle_deg, layers }).unwrap();
        prop_assert_eq!(mesh.point_count(), section.point_count() * layers as usize);
        prop_assert_eq!(mesh.cell_count(), section.quad_count() * (layers as usize - 1));
        prop_assert_eq!(count_inverted_hexes(&mesh), 0);
    }

    #[test]
    fn half_turn_steps_are_rejected(step_deg in 180.0f64..340.0, r0 in 0.1f64..5.0) {
        let section = grid(r0, 1, 1, &[]);
        let params = RevolveParams { angle_deg: step_deg, layers: 2 };
        prop_assert!(revolve_section(&section, &params).is_err());
    }

    #[test]
    fn permutation_inverse_round_trips(target in axis(), x in -1e3f64..1e3, y in -1e3f64..1e3, z in -1e3f64..1e3) {
        let perm = AxisPermutation::for_target(target);
        let p = DVec3::new(x, y, z);
        prop_assert_eq!(perm.inverse().apply_point(perm.apply_point(p)), p);
        // The canonical axial coordinate lands on the target axis.
        prop_assert_eq!(perm.apply_point(p)[target.index()], y);
    }

    #[test]
    fn repair_flips_only_inverted_cells(count in 1u32..8, flips in prop::collection::vec(any::<bool>(), 8)) {
        let original = cube_row(count);
        let mut mesh = original.clone();
        let mut expected = 0;
        for i in 0..count as usize {
            if flips[i] {
                let cell: Vec<u32> = mesh.cell(i).to_vec();
                let inverted = HEX_FLIP.map(|k| cell[k]);
                mesh.cell_mut(i).copy_from_slice(&inverted);
                expected += 1;
            }
        }
        prop_assert_eq!(count_inverted_hexes(&mesh), expected);
        prop_assert_eq!(fix_inverted_hexes(&mut mesh, "prop").unwrap(), expected);
        prop_assert_eq!(count_inverted_hexes(&mesh), 0);
        for i in 0..count as usize {
            if !flips[i] {
                prop_assert_eq!(mesh.cell(i), original.cell(i));
            }
        }
    }

    #[test]
    fn profile_evaluation_stays_within_sample_range(
        samples in prop::collection::vec((0.0f64..10.0, -5.0f64..5.0), 1..12),
        r in -5.0f64..15.0,
    ) {
        let curve = ProfileCurve::from_samples(&samples);
        let value = curve.eval(r);
        let lo = curve.values().iter().copied().fold(f64::INFINITY, f64::min);
        let hi = curve.values().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(value.is_finite());
        prop_assert!(value >= lo - 1e-12 && value <= hi + 1e-12);
    }

    #[test]
    fn tolerances_scale_with_mesh_size(a in 0.01f64..100.0, b in 0.01f64..100.0) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let cfg = |mesh_size| MeshGenConfig { mesh_size, ..MeshGenConfig::default() };
        let (s, l) = (cfg(small), cfg(large));
        prop_assert!(s.stitch_tolerance() <= l.stitch_tolerance());
        prop_assert!(s.interface_tolerance() <= l.interface_tolerance());
        prop_assert!(s.axis_snap_tolerance() <= l.axis_snap_tolerance());
        // Above the floors, stitch classification is tighter than interface detection.
        prop_assert!(l.stitch_tolerance() <= l.interface_tolerance());
        prop_assert!(s.stitch_tolerance() <= s.interface_tolerance());
    }
}
