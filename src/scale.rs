//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// The domain is kept in `f64` so large offsets and narrow spans survive; only the output range
/// is in pixels.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is not finite, or if its span is lost in rounding at the
    /// domain's magnitude.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Result<Self> {
        let span = (domain.1 - domain.0).abs();
        let magnitude = domain.0.abs().max(domain.1.abs());
        if !span.is_finite() || span <= magnitude * f64::EPSILON * 4.0 {
            return Err(Error::ScaleDomain(format!("domain [{}, {}] has no usable span", domain.0, domain.1)));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f64 {
        let t = f64::from((value - self.range_min) / (self.range_max - self.range_min));
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Round tick positions inside the domain, about `count` of them.
    ///
    /// Steps are 1, 2 or 5 times a power of ten.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        };
        let step = nice_step((hi - lo) / count.max(1) as f64);
        if !step.is_finite() || step <= 0.0 {
            return vec![lo];
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

impl Scale<f64, f32> for LinearScale {
    fn scale(&self, value: f64) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t as f32 * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Min and max of the finite values, or `None` if there are none.
pub(crate) fn finite_extent(data: &[f64]) -> Option<(f64, f64)> {
    data.iter().copied().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Band scale mapping discrete categories to equal-width slots.
#[derive(Debug, Clone, Copy)]
pub struct BandScale {
    count: usize,
    range_min: f32,
    range_max: f32,
}

impl BandScale {
    /// Create a band scale for `count` categories.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero.
    pub fn new(count: usize, range: (f32, f32)) -> Result<Self> {
        if count == 0 {
            return Err(Error::ScaleDomain("Band scale requires at least one category".to_string()));
        }
        Ok(Self { count, range_min: range.0, range_max: range.1 })
    }

    /// Width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        (self.range_max - self.range_min) / self.count as f32
    }

    /// Center position of the band at `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> f32 {
        self.range_min + (index as f32 + 0.5) * self.bandwidth()
    }

    /// Number of bands.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Diverging blue-white-red scale for signed quantities such as correlations.
    #[must_use]
    pub fn coolwarm(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(59, 76, 192),
                Rgba::rgb(124, 159, 249),
                Rgba::rgb(192, 212, 245),
                Rgba::rgb(221, 221, 221),
                Rgba::rgb(242, 203, 183),
                Rgba::rgb(238, 132, 104),
                Rgba::rgb(180, 4, 38),
            ],
            domain,
        )
        .ok()
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = ((t * segment_count as f32).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // Screen y grows downward
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("operation should succeed");
        assert!((scale.scale(10.0) - 0.0).abs() < 0.001);
        assert!((scale.invert(50.0) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_linear_scale_large_offset() {
        let scale = LinearScale::new((1.7e9, 1.7e9 + 10.0), (0.0, 100.0)).expect("span survives in f64");
        assert!((scale.scale(1.7e9 + 5.0) - 50.0).abs() < 1e-3);
        assert!((scale.invert(25.0) - (1.7e9 + 2.5)).abs() < 1e-3);
    }

    #[test]
    fn test_linear_scale_tiny_span() {
        let scale = LinearScale::new((1e-8, 3e-8), (0.0, 1.0)).expect("span is relative to magnitude");
        assert!((scale.scale(2e-8) - 0.5).abs() < 1e-4);
        let ticks = scale.ticks(4);
        assert!(ticks.len() >= 2);
        assert!(ticks.iter().all(|&t| (0.99e-8..=3.01e-8).contains(&t)));
    }

    #[test]
    fn test_linear_scale_rejects_lost_span() {
        assert!(LinearScale::new((1e20, 1e20 + 1.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, f64::INFINITY), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_ticks_are_round() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_ticks_stay_inside_domain() {
        let scale =
            LinearScale::new((47_500.0, 77_500.0), (0.0, 1.0)).expect("operation should succeed");
        let ticks = scale.ticks(5);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| (47_500.0..=77_500.0).contains(&t)));
    }

    #[test]
    fn test_band_scale() {
        let band = BandScale::new(4, (0.0, 400.0)).expect("operation should succeed");
        assert!((band.bandwidth() - 100.0).abs() < 0.001);
        assert!((band.center(0) - 50.0).abs() < 0.001);
        assert!((band.center(3) - 350.0).abs() < 0.001);
        assert!(BandScale::new(0, (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_color_scale() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        let mid = scale.scale(0.5);
        assert!(mid.r > 100 && mid.r < 150);
    }

    #[test]
    fn test_color_scale_clamping() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.scale(-1.0), Rgba::BLACK);
        assert_eq!(scale.scale(2.0), Rgba::WHITE);
    }

    #[test]
    fn test_coolwarm_endpoints() {
        let scale = ColorScale::coolwarm((-1.0, 1.0)).expect("operation should succeed");
        assert_eq!(scale.scale(-1.0), Rgba::rgb(59, 76, 192));
        assert_eq!(scale.scale(1.0), Rgba::rgb(180, 4, 38));
        let mid = scale.scale(0.0);
        assert_eq!(mid, Rgba::rgb(221, 221, 221));
    }

    #[test]
    fn test_builtin_invalid_domain() {
        assert!(ColorScale::coolwarm((5.0, 5.0)).is_none());
    }
}
