//! Box and violin plot implementations.
//!
//! Box plots display the distribution of data through quartiles.
//! Violin plots extend this with a mirrored kernel density estimate.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::render::{Scene, Shape, Stroke};
use crate::scale::{LinearScale, Scale};
use crate::stats::{BoxStats, DensityCurve};

use super::axes::{padded, Axes, INK};
use super::categorical::{dodge_for, extent, CategoricalChart, Dodge, Grouping};

/// Grid resolution of each violin's density curve.
const VIOLIN_POINTS: usize = 100;

/// Quartile boxes per category, grouped by hue when present.
pub type BoxChart = CategoricalChart<BoxStats>;

/// Violins per category, grouped by hue when present.
pub type ViolinChart = CategoricalChart<ViolinBody>;

/// Shape of one violin: its quartiles and density.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinBody {
    /// Quartiles drawn inside the violin.
    pub stats: BoxStats,
    /// Density; absent when the values do not vary.
    pub density: Option<DensityCurve>,
}

impl ViolinBody {
    /// Summarize `values`; `None` without finite data.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Some(Self { stats: BoxStats::from_data(values)?, density: DensityCurve::estimate(values, VIOLIN_POINTS) })
    }

    /// Vertical extent, including the density tails.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        let (lo, hi) = self.stats.extent();
        match &self.density {
            Some(d) => (lo.min(d.xs[0]), hi.max(d.xs[d.xs.len() - 1])),
            None => (lo, hi),
        }
    }
}

/// Shared y axis for box and violin charts; `None` without categories.
fn value_axis<T>(
    chart: &CategoricalChart<T>,
    scene: &mut Scene,
    axes: &Axes,
    range: impl Fn(&T) -> (f64, f64),
) -> Result<Option<(Dodge, LinearScale)>> {
    axes.draw_frame(scene);
    let Some(dodge) = dodge_for(chart, axes) else { return Ok(None) };
    let (lo, hi) = extent(chart, range).unwrap_or((0.0, 1.0));
    let ys = axes.y_scale(padded(lo, hi, 0.05))?;
    axes.draw_y_ticks(scene, &ys);
    axes.draw_x_categories(scene, dodge.bands(), &chart.categories);
    Ok(Some((dodge, ys)))
}

impl BoxChart {
    /// Quartiles of `values` per cell.
    #[must_use]
    pub(crate) fn quartiles(grouping: Grouping, values: &[f64], colors: Vec<Rgba>) -> Self {
        Self::build(grouping, values, colors, BoxStats::from_data)
    }

    pub(crate) fn draw(&self, scene: &mut Scene, axes: &Axes) -> Result<()> {
        let Some((dodge, ys)) = value_axis(self, scene, axes, BoxStats::extent)? else { return Ok(()) };
        let outline = Stroke::new(INK, (axes.font * 0.12).max(1.0));

        for (c, g, stats) in self.iter() {
            let x = dodge.center(c, g);
            let half = dodge.width() * 0.45;
            let y = |v: f64| ys.scale(v);

            // Whiskers and caps
            scene.line(Point::new(x, y(stats.min)), Point::new(x, y(stats.q1)), outline);
            scene.line(Point::new(x, y(stats.q3)), Point::new(x, y(stats.max)), outline);
            for v in [stats.min, stats.max] {
                scene.line(Point::new(x - half / 2.0, y(v)), Point::new(x + half / 2.0, y(v)), outline);
            }

            let (top, bottom) = (y(stats.q3), y(stats.q1));
            scene.rect(Rect::new(x - half, top, half * 2.0, bottom - top), self.color(g), Some(outline));
            scene.line(Point::new(x - half, y(stats.median)), Point::new(x + half, y(stats.median)), outline);

            for &v in &stats.outliers {
                scene.push(Shape::Circle {
                    center: Point::new(x, y(v)),
                    radius: (axes.font * 0.25).max(2.0),
                    fill: Rgba::WHITE,
                    stroke: Some(outline),
                });
            }
        }
        Ok(())
    }
}

impl ViolinChart {
    /// Density and quartiles of `values` per cell.
    #[must_use]
    pub(crate) fn densities(grouping: Grouping, values: &[f64], colors: Vec<Rgba>) -> Self {
        Self::build(grouping, values, colors, ViolinBody::from_values)
    }

    pub(crate) fn draw(&self, scene: &mut Scene, axes: &Axes) -> Result<()> {
        let Some((dodge, ys)) = value_axis(self, scene, axes, ViolinBody::extent)? else { return Ok(()) };
        let outline = Stroke::new(INK, (axes.font * 0.12).max(1.0));
        let half = dodge.width() / 2.0;

        for (c, g, body) in self.iter() {
            let x = dodge.center(c, g);
            let y = |v: f64| ys.scale(v);
            let stats = &body.stats;

            match &body.density {
                Some(density) => {
                    let peak = density.max_density();
                    let widths: Vec<f32> =
                        density.ys.iter().map(|&d| if peak > 0.0 { (d / peak) as f32 * half } else { 0.0 }).collect();
                    let right = density.xs.iter().zip(&widths).map(|(&v, &w)| Point::new(x + w, y(v)));
                    let left = density.xs.iter().zip(&widths).rev().map(|(&v, &w)| Point::new(x - w, y(v)));
                    scene.push(Shape::Polygon { points: right.chain(left).collect(), fill: self.color(g), stroke: Some(outline) });
                }
                None => {
                    let v = y(stats.median);
                    scene.line(Point::new(x - half, v), Point::new(x + half, v), Stroke::new(self.color(g), outline.width * 2.0));
                }
            }

            // Inner box: whiskers, quartile bar and median dot
            let inner = (half * 0.12).max(1.5);
            scene.line(Point::new(x, y(stats.min)), Point::new(x, y(stats.max)), Stroke::new(INK, outline.width));
            let (top, bottom) = (y(stats.q3), y(stats.q1));
            scene.rect(Rect::new(x - inner / 2.0, top, inner, bottom - top), INK, None);
            scene.push(Shape::Circle { center: Point::new(x, y(stats.median)), radius: inner * 0.8, fill: Rgba::WHITE, stroke: None });
        }
        Ok(())
    }
}
