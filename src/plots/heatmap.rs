//! Annotated correlation heatmap.
//!
//! Cells are colored on a diverging scale fixed to the value range, so equal colors mean
//! equal coefficients across figures.
//!
//! # References
//!
//! - Moreland, K. (2009). "Diverging Color Maps for Scientific Visualization." ISVC.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::output::TextAnchor;
use crate::render::{Label, Scene, Stroke};
use crate::scale::{ColorScale, LinearScale, Scale};
use crate::stats::CorrelationMatrix;

use super::axes::{format_tick, Axes, INK};

/// Correlation grid with per-cell annotations and a color bar.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapChart {
    /// Coefficients and their column names.
    pub matrix: CorrelationMatrix,
    /// Write each coefficient into its cell.
    pub annotate: bool,
    /// Decimal places of annotations.
    pub precision: usize,
    /// Value mapped to the coldest and warmest colors.
    pub range: (f64, f64),
    /// Width of the white lines between cells.
    pub line_width: f32,
}

impl HeatmapChart {
    /// Annotated, two-decimal grid over [-1, 1] with 0.5px cell lines.
    #[must_use]
    pub fn new(matrix: CorrelationMatrix) -> Self {
        Self { matrix, annotate: true, precision: 2, range: (-1.0, 1.0), line_width: 0.5 }
    }

    /// Toggle cell annotations.
    #[must_use]
    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Set annotation precision.
    #[must_use]
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the color range.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Set the cell line width.
    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Annotation text for one coefficient.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.precision)
    }

    pub(crate) fn draw(&self, scene: &mut Scene, axes: &Axes) -> Result<()> {
        let n = self.matrix.len();
        let colors = ColorScale::coolwarm((self.range.0 as f32, self.range.1 as f32))
            .ok_or_else(|| Error::ScaleDomain(format!("heatmap range {:?} is empty", self.range)))?;
        let font = axes.font;

        // Square grid on the left, color bar on the right.
        let area = axes.area;
        let bar_width = font * 1.2;
        let bar_gap = font * 4.0;
        let side = (area.width - bar_width - bar_gap * 1.5).min(area.height).max(0.0);
        let grid = Rect::new(area.x, area.y, side, side);

        if n > 0 {
            let cell = side / n as f32;
            for i in 0..n {
                for j in 0..n {
                    // Undefined coefficients stay blank
                    let Some(value) = self.matrix.get(i, j).filter(|v| v.is_finite()) else { continue };
                    let fill = colors.scale(value as f32);
                    let rect = Rect::new(grid.x + j as f32 * cell, grid.y + i as f32 * cell, cell, cell);
                    let stroke = (self.line_width > 0.0).then(|| Stroke::new(Rgba::WHITE, self.line_width));
                    scene.rect(rect, fill, stroke);

                    if self.annotate {
                        let size = (cell * 0.25).min(font);
                        scene.text(
                            Label::new(
                                Point::new(rect.center().x, rect.center().y + size * 0.35),
                                self.format_value(value),
                                size,
                                fill.contrasting_text(),
                            )
                            .anchor(TextAnchor::Middle),
                        );
                    }
                }
            }

            for (k, name) in self.matrix.names().iter().enumerate() {
                let center = grid.x + (k as f32 + 0.5) * cell;
                scene.text(
                    Label::new(Point::new(grid.x - axes.pad(), grid.y + (k as f32 + 0.5) * cell + font * 0.35), name.clone(), font, INK)
                        .anchor(TextAnchor::End),
                );
                scene.text(
                    Label::new(Point::new(center, grid.bottom() + axes.pad() + font), name.clone(), font, INK)
                        .anchor(TextAnchor::Middle),
                );
            }
        }

        self.draw_color_bar(scene, axes, Rect::new(grid.right() + bar_gap, grid.y, bar_width, side), &colors)
    }

    fn draw_color_bar(&self, scene: &mut Scene, axes: &Axes, bar: Rect, colors: &ColorScale) -> Result<()> {
        if bar.height <= 0.0 {
            return Ok(());
        }
        let steps = 64;
        let step_h = bar.height / steps as f32;
        let (lo, hi) = (self.range.0 as f32, self.range.1 as f32);
        for s in 0..steps {
            let t = 1.0 - (s as f32 + 0.5) / steps as f32;
            scene.rect(Rect::new(bar.x, bar.y + s as f32 * step_h, bar.width, step_h + 0.5), colors.scale(lo + t * (hi - lo)), None);
        }

        let ticks = LinearScale::new(self.range, (bar.bottom(), bar.y))?;
        for value in ticks.ticks(4) {
            let y = ticks.scale(value);
            scene.line(Point::new(bar.right(), y), Point::new(bar.right() + axes.pad(), y), Stroke::new(INK, 1.0));
            scene.text(Label::new(Point::new(bar.right() + axes.pad() * 2.0, y + axes.font * 0.35), format_tick(value), axes.font, INK));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Style;

    fn matrix() -> CorrelationMatrix {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0, 3.0, 2.0, 4.0];
        CorrelationMatrix::from_columns(&[("a", &a), ("b", &b)])
    }

    fn scene_for(chart: &HeatmapChart) -> Scene {
        let axes = Axes::new(500, 500, Style::White);
        let mut scene = Scene::new(500, 500, Rgba::WHITE);
        chart.draw(&mut scene, &axes).unwrap();
        scene
    }

    #[test]
    fn test_defaults() {
        let chart = HeatmapChart::new(matrix());
        assert!(chart.annotate);
        assert_eq!(chart.precision, 2);
        assert_eq!(chart.range, (-1.0, 1.0));
        assert!((chart.line_width - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_annotations_use_precision() {
        let scene = scene_for(&HeatmapChart::new(matrix()));
        assert!(scene.has_text("1.00"));
        assert!(scene.has_text("0.80"));

        let scene = scene_for(&HeatmapChart::new(matrix()).precision(1));
        assert!(scene.has_text("0.8"));
    }

    #[test]
    fn test_annotations_can_be_disabled() {
        let scene = scene_for(&HeatmapChart::new(matrix()).annotate(false));
        assert!(!scene.has_text("1.00"));
        assert!(scene.has_text("a"));
    }

    #[test]
    fn test_cells_use_fixed_scale() {
        let scene = scene_for(&HeatmapChart::new(matrix()).line_width(0.0));
        let warmest = ColorScale::coolwarm((-1.0, 1.0)).unwrap().scale(1.0);
        let cells = scene
            .shapes()
            .iter()
            .filter(|s| matches!(s, crate::render::Shape::Rect { fill, stroke: None, .. } if *fill == warmest))
            .count();
        // Two diagonal cells plus the top slice of the color bar at most
        assert!(cells >= 2);
    }

    #[test]
    fn test_color_bar_ticks() {
        let scene = scene_for(&HeatmapChart::new(matrix()));
        assert!(scene.has_text("-1"));
        assert!(scene.has_text("0"));
        assert!(scene.has_text("1"));
    }

    #[test]
    fn test_empty_matrix_draws_only_color_bar() {
        let scene = scene_for(&HeatmapChart::new(CorrelationMatrix::from_columns(&[])));
        assert!(!scene.is_empty());
        assert!(!scene.has_text("1.00"));
    }

    #[test]
    fn test_undefined_cells_are_blank() {
        let a = [1.0, 2.0, 3.0];
        let flat = [4.0, 4.0, 4.0];
        let chart = HeatmapChart::new(CorrelationMatrix::from_columns(&[("a", &a), ("flat", &flat)])).line_width(0.5);
        let scene = scene_for(&chart);

        let cells = scene
            .shapes()
            .iter()
            .filter(|s| matches!(s, crate::render::Shape::Rect { stroke: Some(_), .. }))
            .count();
        assert_eq!(cells, 2);
        assert!(scene.has_text("1.00"));
        assert!(!scene.has_text("NaN"));
        assert!(!scene.has_text("0.00"));
    }

    #[test]
    fn test_empty_range_is_an_error() {
        let chart = HeatmapChart::new(matrix()).range(0.5, 0.5);
        let axes = Axes::new(500, 500, Style::White);
        let mut scene = Scene::new(500, 500, Rgba::WHITE);
        assert!(matches!(chart.draw(&mut scene, &axes), Err(Error::ScaleDomain(_))));
    }
}
