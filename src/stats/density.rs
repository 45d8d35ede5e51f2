//! Gaussian kernel density estimation.

use super::summary::{finite_sorted, std_dev};

/// sqrt(2π)
const SQRT_TAU: f64 = 2.506_628_274_631_000_7;

/// Grid extension past the data range, in bandwidths.
const CUT: f64 = 3.0;

/// A density curve sampled on an evenly spaced grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    /// Grid positions, ascending.
    pub xs: Vec<f64>,
    /// Density at each grid position.
    pub ys: Vec<f64>,
    /// Kernel bandwidth used.
    pub bandwidth: f64,
    /// Number of observations behind the estimate.
    pub count: usize,
}

impl DensityCurve {
    /// Estimate the density of the finite values of `data` at `points` grid positions.
    ///
    /// Bandwidth follows the normal-reference rule `1.06 · σ · n^(-1/5)`. Returns `None`
    /// with fewer than two finite values or zero variance, where no kernel width is defined.
    #[must_use]
    pub fn estimate(data: &[f64], points: usize) -> Option<Self> {
        let clean = finite_sorted(data);
        if clean.len() < 2 || points < 2 {
            return None;
        }

        let n = clean.len() as f64;
        let sigma = std_dev(&clean);
        if sigma <= 0.0 {
            return None;
        }
        let h = 1.06 * sigma * n.powf(-0.2);

        let lo = clean[0] - CUT * h;
        let hi = clean[clean.len() - 1] + CUT * h;
        let step = (hi - lo) / (points - 1) as f64;
        let norm = n * h * SQRT_TAU;

        let xs: Vec<f64> = (0..points).map(|i| lo + i as f64 * step).collect();
        let ys = xs
            .iter()
            .map(|&x| {
                clean
                    .iter()
                    .map(|&xi| {
                        let u = (x - xi) / h;
                        (-0.5 * u * u).exp()
                    })
                    .sum::<f64>()
                    / norm
            })
            .collect();

        Some(Self { xs, ys, bandwidth: h, count: clean.len() })
    }

    /// Peak density.
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.ys.iter().copied().fold(0.0, f64::max)
    }

    /// Area under the curve by the trapezoid rule.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.xs
            .windows(2)
            .zip(self.ys.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
            .sum()
    }

    /// Densities scaled to expected counts per bin of width `bin_width`.
    ///
    /// Lets the curve share a y axis with a count histogram.
    #[must_use]
    pub fn scaled_to_counts(&self, bin_width: f64) -> Vec<f64> {
        let factor = self.count as f64 * bin_width;
        self.ys.iter().map(|y| y * factor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_kde_basic() {
        let data = [1.0, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0];
        let kde = DensityCurve::estimate(&data, 200).unwrap();

        assert_eq!(kde.xs.len(), 200);
        assert_eq!(kde.ys.len(), 200);
        assert_eq!(kde.count, 7);
        assert!(kde.xs[0] < 1.0);
        assert!(kde.xs[199] > 5.0);
        assert!(kde.ys.iter().all(|&y| y >= 0.0));
    }

    #[test]
    fn test_kde_peak_near_mode() {
        let data = [0.0, 9.0, 10.0, 10.0, 10.0, 11.0, 20.0];
        let kde = DensityCurve::estimate(&data, 401).unwrap();
        let peak = kde.ys.iter().enumerate().max_by(|a, b| a.1.total_cmp(b.1)).map(|(i, _)| kde.xs[i]).unwrap();
        assert!((peak - 10.0).abs() < 1.5, "peak at {peak}");
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let data: Vec<f64> = (0..50).map(|i| f64::from(i % 7) * 1.3 + f64::from(i) * 0.1).collect();
        let kde = DensityCurve::estimate(&data, 512).unwrap();
        assert_relative_eq!(kde.integral(), 1.0, epsilon = 0.01);
    }

    #[test]
    fn test_kde_degenerate_inputs() {
        assert!(DensityCurve::estimate(&[], 100).is_none());
        assert!(DensityCurve::estimate(&[1.0], 100).is_none());
        assert!(DensityCurve::estimate(&[3.0, 3.0, 3.0], 100).is_none());
        assert!(DensityCurve::estimate(&[f64::NAN, 1.0], 100).is_none());
        assert!(DensityCurve::estimate(&[1.0, 2.0], 1).is_none());
    }

    #[test]
    fn test_scaled_to_counts() {
        let kde = DensityCurve::estimate(&[1.0, 2.0, 3.0, 4.0], 64).unwrap();
        let scaled = kde.scaled_to_counts(0.5);
        assert_relative_eq!(scaled[10], kde.ys[10] * 2.0);
    }

    proptest! {
        #[test]
        fn prop_kde_nonnegative_and_normalized(data in prop::collection::vec(-1000.0f64..1000.0, 2..40)) {
            prop_assume!(std_dev(&data) > 1e-6);
            let kde = DensityCurve::estimate(&data, 256).unwrap();
            prop_assert!(kde.ys.iter().all(|&y| y >= 0.0 && y.is_finite()));
            prop_assert!((kde.integral() - 1.0).abs() < 0.05);
        }
    }
}
