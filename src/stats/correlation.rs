//! Pearson correlation matrices.
//!
//! Observations are pairwise-complete: rows where either value is missing are dropped for
//! that pair only.

use crate::data::NumericProjection;

const CHUNK_SIZE: usize = 8;

/// Pearson coefficient of two equally long series, skipping rows with a missing value.
///
/// Returns NaN when fewer than two complete rows remain or either side has no variance; the
/// coefficient is undefined there. The result does not depend on the units of either series.
///
/// # Formula
///
/// r = Σ((xi - x̄)(yi - ȳ)) / √(Σ(xi - x̄)² × Σ(yi - ȳ)²)
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) =
        x.iter().zip(y).filter(|(a, b)| a.is_finite() && b.is_finite()).map(|(a, b)| (*a, *b)).unzip();
    let n = xs.len();
    if n < 2 || is_constant(&xs) || is_constant(&ys) {
        return f64::NAN;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut sum_xy, mut sum_xx, mut sum_yy) = (0.0, 0.0, 0.0);
    // Chunked accumulation keeps the inner loop vectorizable
    for (cx, cy) in xs.chunks(CHUNK_SIZE).zip(ys.chunks(CHUNK_SIZE)) {
        for (a, b) in cx.iter().zip(cy) {
            let dx = a - mean_x;
            let dy = b - mean_y;
            sum_xy += dx * dy;
            sum_xx += dx * dx;
            sum_yy += dy * dy;
        }
    }

    let denominator = sum_xx.sqrt() * sum_yy.sqrt();
    if denominator > 0.0 && denominator.is_finite() {
        (sum_xy / denominator).clamp(-1.0, 1.0)
    } else {
        f64::NAN
    }
}

#[allow(clippy::float_cmp)]
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Square, symmetric matrix of pairwise correlation coefficients keyed by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    /// Row-major, `names.len()²` entries.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Correlate every pair of projected columns.
    #[must_use]
    pub fn from_projection(projection: &NumericProjection) -> Self {
        let columns: Vec<(&str, &[f64])> = projection.iter().collect();
        Self::from_columns(&columns)
    }

    /// Correlate every pair of named series.
    #[must_use]
    pub fn from_columns(columns: &[(&str, &[f64])]) -> Self {
        let n = columns.len();
        let mut values = vec![0.0; n * n];

        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(columns[i].1, columns[j].1);
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        Self { names: columns.iter().map(|(name, _)| (*name).to_string()).collect(), values }
    }

    /// Column names labelling rows and columns.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the matrix is 0×0.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Coefficient at `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.len();
        (i < n && j < n).then(|| self.values[i * n + j])
    }

    /// Coefficient between two named columns.
    #[must_use]
    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        self.get(i, j)
    }

    /// Row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        let n = self.len();
        (i < n).then(|| &self.values[i * n..(i + 1) * n])
    }

    /// Rows as nested vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.len()).filter_map(|i| self.row(i).map(<[f64]>::to_vec)).collect()
    }

    /// Whether `m[i][j]` and `m[j][i]` agree within `tolerance` everywhere.
    ///
    /// Undefined (NaN) coefficients agree with each other.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            (i + 1..n).all(|j| {
                let (a, b) = (self.values[i * n + j], self.values[j * n + i]);
                (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
            })
        })
    }

    /// The `top_n` off-diagonal pairs with the largest absolute coefficient, skipping
    /// undefined ones.
    #[must_use]
    pub fn strongest_pairs(&self, top_n: usize) -> Vec<(&str, &str, f64)> {
        let n = self.len();
        let mut pairs: Vec<(&str, &str, f64)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| (self.names[i].as_str(), self.names[j].as_str(), self.values[i * n + j]))
            .filter(|p| !p.2.is_nan())
            .collect();
        pairs.sort_by(|a, b| b.2.abs().total_cmp(&a.2.abs()));
        pairs.truncate(top_n);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_pearson_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(pearson(&x, &[2.0, 4.0, 6.0, 8.0, 10.0]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&x, &[10.0, 8.0, 6.0, 4.0, 2.0]), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_age_salary() {
        let r = pearson(&[25.0, 30.0, 35.0], &[50_000.0, 60_000.0, 75_000.0]);
        assert_relative_eq!(r, 0.993_399, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_zero_variance() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        let x = [1.0, 2.0, f64::NAN, 4.0];
        let y = [2.0, 4.0, 100.0, 8.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
        assert!(pearson(&[f64::NAN, 1.0], &[1.0, 2.0]).is_nan());
    }

    #[test]
    fn test_pearson_is_scale_invariant() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.0, 6.5];
        let unit = pearson(&x, &y);
        assert_relative_eq!(unit, 0.997_948_7, epsilon = 1e-6);

        for factor in [1e-6, 1e-150, 1e150] {
            let xs: Vec<f64> = x.iter().map(|v| v * factor).collect();
            let ys: Vec<f64> = y.iter().map(|v| v * factor).collect();
            assert_relative_eq!(pearson(&xs, &ys), unit, epsilon = 1e-9);
        }
        assert_relative_eq!(pearson(&[1e-6, 2e-6, 3e-6], &[3e-6, 2e-6, 1e-6]), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_undefined_pairs_keep_unit_diagonal() {
        let a = [1.0, 2.0, 3.0];
        let flat = [7.0, 7.0, 7.0];
        let m = CorrelationMatrix::from_columns(&[("a", &a), ("flat", &flat)]);

        assert_eq!(m.get(1, 1), Some(1.0));
        assert!(m.get_by_name("a", "flat").is_some_and(f64::is_nan));
        assert!(m.is_symmetric(0.0));
        assert!(m.strongest_pairs(3).is_empty());
    }

    #[test]
    fn test_matrix_shape_and_lookup() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.0, 1.0];
        let c = [1.0, 3.0, 2.0, 4.0];
        let m = CorrelationMatrix::from_columns(&[("a", &a), ("b", &b), ("c", &c)]);

        assert_eq!(m.len(), 3);
        assert_eq!(m.names(), &["a", "b", "c"]);
        assert_relative_eq!(m.get_by_name("a", "b").unwrap(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(m.get_by_name("c", "a").unwrap(), 0.8, epsilon = 1e-12);
        assert!(m.get(3, 0).is_none());
        assert!(m.get_by_name("a", "z").is_none());
        assert_eq!(m.to_rows().len(), 3);
        assert_eq!(m.row(1).map(<[f64]>::len), Some(3));
    }

    #[test]
    fn test_strongest_pairs() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.0, 1.0];
        let c = [1.0, 3.0, 2.0, 4.0];
        let m = CorrelationMatrix::from_columns(&[("a", &a), ("b", &b), ("c", &c)]);
        let top = m.strongest_pairs(1);

        assert_eq!(top.len(), 1);
        assert_eq!((top[0].0, top[0].1), ("a", "b"));
    }

    #[test]
    fn test_empty_matrix() {
        let m = CorrelationMatrix::from_columns(&[]);
        assert!(m.is_empty());
        assert!(m.is_symmetric(0.0));
        assert!(m.strongest_pairs(3).is_empty());
    }

    proptest! {
        #[test]
        fn prop_matrix_symmetric_unit_diagonal(
            cols in prop::collection::vec(prop::collection::vec(-1e6f64..1e6, 6), 0..6)
        ) {
            let named: Vec<(String, Vec<f64>)> =
                cols.into_iter().enumerate().map(|(i, c)| (format!("c{i}"), c)).collect();
            let refs: Vec<(&str, &[f64])> =
                named.iter().map(|(n, c)| (n.as_str(), c.as_slice())).collect();
            let m = CorrelationMatrix::from_columns(&refs);

            prop_assert_eq!(m.len(), refs.len());
            prop_assert!(m.is_symmetric(0.0));
            for i in 0..m.len() {
                prop_assert_eq!(m.get(i, i), Some(1.0));
                for j in 0..m.len() {
                    let r = m.get(i, j).unwrap();
                    prop_assert!(r.is_nan() || (-1.0..=1.0).contains(&r));
                }
            }
        }
    }
}
