//! # Profile Interpolants
//!
//! Piecewise-linear A(R) functions describing the core's bottom and top
//! boundaries. Evaluation is clamped outside the sampled radius range, never
//! extrapolated.

use config::constants::{round_to_decimals, PROFILE_DEDUP_DECIMALS, PROFILE_ORIGIN_EPSILON};

/// A clamped piecewise-linear interpolant over radius.
///
/// # Example
///
/// ```rust
/// use hexmesh::geometry::ProfileCurve;
///
/// let curve = ProfileCurve::from_samples(&[(1.0, 2.0), (3.0, 4.0)]);
/// assert_eq!(curve.eval(2.0), 3.0);
/// assert_eq!(curve.eval(0.0), 2.0); // clamped
/// assert_eq!(curve.eval(9.0), 4.0); // clamped
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileCurve {
    radii: Vec<f64>,
    values: Vec<f64>,
}

impl ProfileCurve {
    /// Builds an interpolant from (R, A) samples.
    ///
    /// Non-finite samples are dropped. Radii equal after rounding to
    /// [`PROFILE_DEDUP_DECIMALS`] places are collapsed to one knot carrying the
    /// mean of their values.
    pub fn from_samples(samples: &[(f64, f64)]) -> Self {
        let mut sorted: Vec<(f64, f64)> = samples
            .iter()
            .copied()
            .filter(|(r, a)| r.is_finite() && a.is_finite())
            .map(|(r, a)| (round_to_decimals(r, PROFILE_DEDUP_DECIMALS), a))
            .collect();
        sorted.sort_by(|p, q| p.0.total_cmp(&q.0));

        let mut radii: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut values: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut counts: Vec<u32> = Vec::with_capacity(sorted.len());
        for (r, a) in sorted {
            match radii.last() {
                Some(&last) if last == r => {
                    if let (Some(sum), Some(n)) = (values.last_mut(), counts.last_mut()) {
                        *sum += a;
                        *n += 1;
                    }
                }
                _ => {
                    radii.push(r);
                    values.push(a);
                    counts.push(1);
                }
            }
        }
        for (v, n) in values.iter_mut().zip(&counts) {
            *v /= f64::from(*n);
        }

        Self { radii, values }
    }

    /// Returns a copy guaranteed to carry a knot at R = 0.
    ///
    /// When the first knot lies off the axis, the line through the first two
    /// knots is extended to R = 0. A single-knot curve is constant, so its value
    /// is simply repeated.
    pub fn anchored_at_axis(mut self) -> Self {
        match (self.radii.first().copied(), self.radii.get(1).copied()) {
            (Some(r0), _) if r0 <= PROFILE_ORIGIN_EPSILON => {}
            (Some(r0), Some(r1)) => {
                let (a0, a1) = (self.values[0], self.values[1]);
                let a_at_axis = a0 + (0.0 - r0) * (a1 - a0) / (r1 - r0);
                self.radii.insert(0, 0.0);
                self.values.insert(0, a_at_axis);
            }
            (Some(_), None) => {
                let a0 = self.values[0];
                self.radii.insert(0, 0.0);
                self.values.insert(0, a0);
            }
            (None, _) => {}
        }
        self
    }

    /// Evaluates A(R), clamping to the end values outside the knot range.
    ///
    /// An empty curve evaluates to 0.
    pub fn eval(&self, r: f64) -> f64 {
        let (Some(&first), Some(&last)) = (self.radii.first(), self.radii.last()) else {
            return 0.0;
        };
        let n = self.radii.len();
        // NaN falls through to the first value.
        if !(r > first) {
            return self.values[0];
        }
        if r >= last {
            return self.values[n - 1];
        }
        let hi = self.radii.partition_point(|&x| x <= r);
        let lo = hi - 1;
        let t = (r - self.radii[lo]) / (self.radii[hi] - self.radii[lo]);
        self.values[lo] + t * (self.values[hi] - self.values[lo])
    }

    /// Number of knots after de-duplication.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.radii.len()
    }

    /// Knot radii in increasing order.
    #[inline]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Knot values matching [`radii`](Self::radii).
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
