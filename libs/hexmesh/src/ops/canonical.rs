//! # Axis Canonicalization
//!
//! The working frame always carries the axial direction on the second
//! coordinate, with R = hypot(x, z). These helpers rotate about that axis,
//! snap points onto it, and relabel columns to the requested output axis.

use config::Axis;
use glam::DVec3;

/// Rotates points about the canonical axial (+Y) axis by `angle_deg`.
///
/// `(x, z) -> (cos a · x - sin a · z, sin a · x + cos a · z)`
pub fn rotate_about_axial(points: &mut [DVec3], angle_deg: f64) {
    let (s, c) = angle_deg.to_radians().sin_cos();
    for p in points {
        let (x, z) = (p.x, p.z);
        p.x = c * x - s * z;
        p.z = s * x + c * z;
    }
}

/// Places points closer than `tol` to the axial axis exactly on it.
///
/// Returns the number of snapped points.
pub fn snap_near_axis(points: &mut [DVec3], tol: f64) -> usize {
    let mut snapped = 0;
    for p in points.iter_mut().filter(|p| p.x.hypot(p.z) < tol) {
        p.x = 0.0;
        p.z = 0.0;
        snapped += 1;
    }
    snapped
}

/// Column permutation of point coordinates.
///
/// Entry `i` names the old coordinate that becomes new coordinate `i`.
///
/// # Example
///
/// ```rust
/// use config::Axis;
/// use glam::DVec3;
/// use hexmesh::ops::AxisPermutation;
///
/// let perm = AxisPermutation::for_target(Axis::Z);
/// let p = DVec3::new(1.0, 2.0, 3.0);
/// assert_eq!(perm.apply_point(p), DVec3::new(1.0, 3.0, 2.0));
/// assert_eq!(perm.inverse().apply_point(perm.apply_point(p)), p);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPermutation([usize; 3]);

impl AxisPermutation {
    /// Leaves every coordinate in place.
    pub const IDENTITY: Self = Self([0, 1, 2]);

    /// Permutation moving the canonical axial coordinate (Y) onto `target`.
    pub fn for_target(target: Axis) -> Self {
        match target {
            Axis::X => Self([1, 0, 2]),
            Axis::Y => Self::IDENTITY,
            Axis::Z => Self([0, 2, 1]),
        }
    }

    /// Old-coordinate index for each new coordinate.
    #[inline]
    pub fn new_from_old(&self) -> [usize; 3] {
        self.0
    }

    /// Returns true if no coordinate moves.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns true if the permutation is a reflection (odd), which inverts
    /// every hexahedron it is applied to.
    pub fn is_odd(&self) -> bool {
        let [a, b, c] = self.0;
        let inversions = usize::from(a > b) + usize::from(a > c) + usize::from(b > c);
        inversions % 2 == 1
    }

    /// The permutation undoing this one.
    pub fn inverse(&self) -> Self {
        let mut inv = [0; 3];
        for (new, &old) in self.0.iter().enumerate() {
            inv[old] = new;
        }
        Self(inv)
    }

    /// Permutes one point.
    #[inline]
    pub fn apply_point(&self, p: DVec3) -> DVec3 {
        let [a, b, c] = self.0;
        DVec3::new(p[a], p[b], p[c])
    }

    /// Permutes points in place.
    pub fn apply(&self, points: &mut [DVec3]) {
        if self.is_identity() {
            return;
        }
        for p in points {
            *p = self.apply_point(*p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotate_quarter_turn() {
        let mut pts = [DVec3::new(1.0, 5.0, 0.0)];
        rotate_about_axial(&mut pts, 90.0);
        assert_abs_diff_eq!(pts[0].x, 0.0, epsilon = 1e-15);
        assert_eq!(pts[0].y, 5.0);
        assert_abs_diff_eq!(pts[0].z, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let mut pts = [DVec3::new(0.3, -1.0, 0.7)];
        rotate_about_axial(&mut pts, 0.0);
        assert_eq!(pts[0], DVec3::new(0.3, -1.0, 0.7));
    }

    #[test]
    fn test_snap_near_axis() {
        let mut pts = [DVec3::new(1e-14, 2.0, -1e-14), DVec3::new(0.5, 1.0, 0.0)];
        assert_eq!(snap_near_axis(&mut pts, 1e-12), 1);
        assert_eq!(pts[0], DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(pts[1], DVec3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn test_target_permutations() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisPermutation::for_target(Axis::Y).apply_point(p), p);
        assert_eq!(
            AxisPermutation::for_target(Axis::X).apply_point(p),
            DVec3::new(2.0, 1.0, 3.0)
        );
        assert!(AxisPermutation::for_target(Axis::Y).is_identity());
        assert!(AxisPermutation::for_target(Axis::Z).is_odd());
        assert!(AxisPermutation::for_target(Axis::X).is_odd());
        assert!(!AxisPermutation::IDENTITY.is_odd());
    }

    #[test]
    fn test_inverse_recovers_points() {
        for axis in Axis::ALL {
            let perm = AxisPermutation::for_target(axis);
            let mut pts = vec![DVec3::new(1.5, -2.0, 7.25), DVec3::new(0.0, 3.0, -1.0)];
            let original = pts.clone();
            perm.apply(&mut pts);
            perm.inverse().apply(&mut pts);
            assert_eq!(pts, original);
        }
    }
}
