//! Histogram with a kernel density overlay.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::render::{Scene, Shape, Stroke};
use crate::scale::Scale;
use crate::stats::{BinStrategy, Bins, DensityCurve};

use super::axes::{zero_based, Axes};

/// Binned counts of one column, optionally with its density curve.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    /// Source column name.
    pub column: String,
    /// Bins, absent when the column has no finite values.
    pub bins: Option<Bins>,
    /// Density estimate, absent for fewer than two distinct values.
    pub density: Option<DensityCurve>,
    /// Bar and curve color.
    pub color: Rgba,
}

impl HistogramChart {
    /// Bin `values` and estimate their density on `kde_points` grid positions.
    #[must_use]
    pub fn from_values(column: impl Into<String>, values: &[f64], strategy: BinStrategy, kde_points: usize, color: Rgba) -> Self {
        Self {
            column: column.into(),
            bins: Bins::compute(values, strategy),
            density: DensityCurve::estimate(values, kde_points),
            color,
        }
    }

    /// Density curve in count units, matching the bars' y axis.
    #[must_use]
    pub fn density_counts(&self) -> Option<Vec<f64>> {
        let (bins, density) = (self.bins.as_ref()?, self.density.as_ref()?);
        Some(density.scaled_to_counts(bins.width()))
    }

    pub(crate) fn draw(&self, scene: &mut Scene, axes: &Axes) -> Result<()> {
        axes.draw_frame(scene);
        let Some(bins) = &self.bins else { return Ok(()) };
        let (Some(&lo), Some(&hi)) = (bins.edges.first(), bins.edges.last()) else { return Ok(()) };

        let curve = self.density_counts();
        let x_domain = match &self.density {
            Some(d) => (lo.min(d.xs[0]), hi.max(d.xs[d.xs.len() - 1])),
            None => (lo, hi),
        };
        let peak = curve.iter().flatten().copied().fold(bins.max_count() as f64, f64::max);

        let xs = axes.x_scale(x_domain)?;
        let ys = axes.y_scale(zero_based(0.0, peak))?;
        axes.draw_x_ticks(scene, &xs);
        axes.draw_y_ticks(scene, &ys);

        let base = ys.scale(0.0);
        let fill = self.color.with_alpha(191);
        for (i, &count) in bins.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let x0 = xs.scale(bins.edges[i]);
            let x1 = xs.scale(bins.edges[i + 1]);
            let top = ys.scale(count as f64);
            scene.rect(Rect::new(x0, top, x1 - x0, base - top), fill, Some(Stroke::new(Rgba::WHITE, 1.0)));
        }

        if let (Some(density), Some(curve)) = (&self.density, curve) {
            let points = density
                .xs
                .iter()
                .zip(&curve)
                .map(|(&x, &y)| Point::new(xs.scale(x), ys.scale(y)))
                .collect();
            scene.push(Shape::Polyline { points, stroke: Stroke::new(self.color, (axes.font * 0.15).max(1.5)) });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Style;

    fn draw(chart: &HistogramChart) -> Scene {
        let axes = Axes::new(200, 200, Style::White);
        let mut scene = Scene::new(200, 200, Rgba::WHITE);
        chart.draw(&mut scene, &axes).unwrap();
        scene
    }

    #[test]
    fn test_histogram_chart_from_values() {
        let chart = HistogramChart::from_values("age", &[25.0, 30.0, 35.0, 40.0], BinStrategy::Fixed(3), 50, Rgba::BLUE);
        assert_eq!(chart.column, "age");
        assert_eq!(chart.bins.as_ref().map(Bins::total), Some(4));
        assert_eq!(chart.density.as_ref().map(|d| d.xs.len()), Some(50));
        assert_eq!(chart.density_counts().map(|c| c.len()), Some(50));
    }

    #[test]
    fn test_draws_bars_and_curve() {
        let chart = HistogramChart::from_values("x", &[1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0], BinStrategy::Auto, 64, Rgba::BLUE);
        let scene = draw(&chart);

        let bars = scene.shapes().iter().filter(|s| matches!(s, Shape::Rect { stroke: Some(_), .. })).count();
        assert_eq!(bars, chart.bins.as_ref().map_or(0, |b| b.counts.iter().filter(|&&c| c > 0).count()));
        assert!(scene.shapes().iter().any(|s| matches!(s, Shape::Polyline { .. })));
    }

    #[test]
    fn test_constant_column_has_no_curve() {
        let chart = HistogramChart::from_values("x", &[5.0, 5.0], BinStrategy::Auto, 64, Rgba::BLUE);
        assert!(chart.density.is_none());
        let scene = draw(&chart);
        assert!(!scene.shapes().iter().any(|s| matches!(s, Shape::Polyline { .. })));
    }

    #[test]
    fn test_all_missing_draws_empty_axes() {
        let chart = HistogramChart::from_values("x", &[f64::NAN], BinStrategy::Auto, 64, Rgba::BLUE);
        assert!(chart.bins.is_none());
        assert!(!draw(&chart).is_empty());
    }

    #[test]
    fn test_offset_values_draw_bars() {
        let values = [1.7e9, 1.7e9 + 5.0, 1.7e9 + 5.0, 1.7e9 + 10.0];
        let chart = HistogramChart::from_values("t", &values, BinStrategy::Fixed(2), 32, Rgba::BLUE);
        let scene = draw(&chart);

        let bars = scene.shapes().iter().filter(|s| matches!(s, Shape::Rect { stroke: Some(_), .. })).count();
        assert_eq!(bars, 2);
        assert!(scene.shapes().iter().any(|s| matches!(s, Shape::Polyline { .. })));
    }
}
