//! Descriptive statistics: binning, quartiles and mean estimates.

use serde::{Deserialize, Serialize};

/// Upper bound on automatically chosen bin counts.
const MAX_AUTO_BINS: usize = 1000;

/// Binning strategy for histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinStrategy {
    /// The larger of the Sturges and Freedman-Diaconis counts.
    #[default]
    Auto,
    /// Sturges' rule: ceil(log2(n)) + 1
    Sturges,
    /// Scott's rule: width 3.5 * std / n^(1/3)
    Scott,
    /// Freedman-Diaconis rule: width 2 * IQR / n^(1/3)
    FreedmanDiaconis,
    /// Fixed number of bins
    Fixed(usize),
}

impl BinStrategy {
    /// Number of bins for `values`; the slice must be finite and sorted ascending.
    #[must_use]
    pub fn bin_count(self, sorted: &[f64]) -> usize {
        let n = sorted.len();
        if n == 0 {
            return 1;
        }
        let range = sorted[n - 1] - sorted[0];

        let by_width = |width: f64| -> Option<usize> {
            (width > 0.0 && range > 0.0).then(|| ((range / width).ceil() as usize).min(MAX_AUTO_BINS))
        };
        let sturges = ((n as f64).log2().ceil() as usize) + 1;

        match self {
            BinStrategy::Auto => {
                by_width(freedman_diaconis_width(sorted)).map_or(sturges, |fd| fd.max(sturges))
            }
            BinStrategy::Sturges => sturges,
            BinStrategy::Scott => {
                let width = 3.5 * std_dev(sorted) / (n as f64).cbrt();
                by_width(width).unwrap_or(sturges)
            }
            BinStrategy::FreedmanDiaconis => {
                by_width(freedman_diaconis_width(sorted)).unwrap_or(sturges)
            }
            BinStrategy::Fixed(bins) => bins,
        }
        .max(1)
    }
}

fn freedman_diaconis_width(sorted: &[f64]) -> f64 {
    let iqr = percentile(sorted, 75.0) - percentile(sorted, 25.0);
    2.0 * iqr / (sorted.len() as f64).cbrt()
}

/// Equal-width histogram bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    /// Bin edges, one more than `counts`.
    pub edges: Vec<f64>,
    /// Observations per bin; the last bin is closed on the right.
    pub counts: Vec<usize>,
}

impl Bins {
    /// Bin the finite values of `data`.
    ///
    /// Returns `None` when there are no finite values. Constant data gets one unit-wide bin
    /// centered on the value.
    #[must_use]
    pub fn compute(data: &[f64], strategy: BinStrategy) -> Option<Self> {
        let sorted = finite_sorted(data);
        let (&lo, &hi) = (sorted.first()?, sorted.last()?);

        if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
            return Some(Self { edges: vec![lo - 0.5, lo + 0.5], counts: vec![sorted.len()] });
        }

        let bins = strategy.bin_count(&sorted);
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();

        let mut counts = vec![0usize; bins];
        for &v in &sorted {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether there are no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Width of one bin.
    #[must_use]
    pub fn width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    /// Total number of binned observations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest bin count.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Statistics computed for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Lower whisker: smallest value inside the fences.
    pub min: f64,
    /// First quartile (25th percentile)
    pub q1: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// Third quartile (75th percentile)
    pub q3: f64,
    /// Upper whisker: largest value inside the fences.
    pub max: f64,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f64,
    /// Values beyond 1.5 * IQR from the quartiles.
    pub outliers: Vec<f64>,
    /// Number of finite observations.
    pub count: usize,
}

impl BoxStats {
    /// Compute box plot statistics using the 1.5 * IQR rule; `None` without finite data.
    #[must_use]
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let sorted = finite_sorted(data);
        let (&first, &last) = (sorted.first()?, sorted.last()?);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let min = sorted.iter().copied().find(|&x| x >= lower_fence).unwrap_or(first);
        let max = sorted.iter().rev().copied().find(|&x| x <= upper_fence).unwrap_or(last);
        let outliers =
            sorted.iter().copied().filter(|&x| x < lower_fence || x > upper_fence).collect();

        Some(Self { min, q1, median, q3, max, iqr, outliers, count: sorted.len() })
    }

    /// Smallest and largest value drawn, outliers included.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        self.outliers.iter().fold((self.min, self.max), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// Percentile `p` (0-100) of sorted data using linear interpolation.
///
/// Returns `NaN` for empty input.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let k = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let f = k.floor() as usize;
            let c = (k.ceil() as usize).min(n - 1);
            let d = k - f as f64;
            sorted[f] * (1.0 - d) + sorted[c] * d
        }
    }
}

/// Mean with a 95% normal-approximation confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanEstimate {
    /// Sample mean.
    pub mean: f64,
    /// Number of finite observations.
    pub count: usize,
    /// `mean ± 1.96 · SE`, absent with fewer than two observations.
    pub interval: Option<(f64, f64)>,
}

impl MeanEstimate {
    /// z-score of the two-sided 95% interval.
    pub const Z_95: f64 = 1.96;

    /// Estimate the mean of the finite values; `None` without any.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;

        let interval = (count >= 2).then(|| {
            let var = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            let half = Self::Z_95 * var.sqrt() / (count as f64).sqrt();
            (mean - half, mean + half)
        });

        Some(Self { mean, count, interval })
    }
}

/// Finite values in ascending order.
pub(crate) fn finite_sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Population standard deviation; 0.0 for fewer than two values.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt()
}
