//! Bar chart of category means.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::render::{Scene, Stroke};
use crate::scale::Scale;
use crate::stats::MeanEstimate;

use super::axes::{zero_based, Axes, INK};
use super::categorical::{dodge_for, extent, CategoricalChart, Grouping};

/// Mean of a numeric column per category, grouped by hue when present.
pub type BarChart = CategoricalChart<MeanEstimate>;

impl BarChart {
    /// Average `values` per cell.
    ///
    /// Ungrouped bars carry a 95% confidence interval; grouped bars are drawn without one.
    #[must_use]
    pub(crate) fn means(grouping: Grouping, values: &[f64], colors: Vec<Rgba>) -> Self {
        let grouped = grouping.is_grouped();
        Self::build(grouping, values, colors, |cell| {
            MeanEstimate::from_values(cell).map(|m| if grouped { MeanEstimate { interval: None, ..m } } else { m })
        })
    }

    pub(crate) fn draw(&self, scene: &mut Scene, axes: &Axes) -> Result<()> {
        axes.draw_frame(scene);
        let Some(dodge) = dodge_for(self, axes) else { return Ok(()) };

        let (lo, hi) = extent(self, |m| m.interval.unwrap_or((m.mean, m.mean))).unwrap_or((0.0, 1.0));
        let ys = axes.y_scale(zero_based(lo, hi))?;
        axes.draw_y_ticks(scene, &ys);
        axes.draw_x_categories(scene, dodge.bands(), &self.categories);

        let base = ys.scale(0.0);
        let width = dodge.width();
        let error = Stroke::new(INK, (axes.font * 0.15).max(1.5));

        for (c, g, estimate) in self.iter() {
            let x = dodge.center(c, g);
            let top = ys.scale(estimate.mean);
            let rect = Rect::new(x - width / 2.0, top.min(base), width, (base - top).abs());
            scene.rect(rect, self.color(g), None);

            if let Some((low, high)) = estimate.interval {
                let (y0, y1) = (ys.scale(low), ys.scale(high));
                scene.line(Point::new(x, y0), Point::new(x, y1), error);
            }
        }
        Ok(())
    }
}
