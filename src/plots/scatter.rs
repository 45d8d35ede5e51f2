//! Scatter plot implementation.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::render::{Scene, Shape, Stroke};
use crate::scale::{finite_extent, Scale};

use super::axes::{padded, Axes};

/// Points sharing one color, typically one hue level.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    /// Hue level, `None` for an ungrouped plot.
    pub label: Option<String>,
    /// Marker fill.
    pub color: Rgba,
    /// `(x, y)` pairs, both finite.
    pub points: Vec<(f64, f64)>,
}

/// Two numeric columns plotted against each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    /// Series in drawing order.
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    /// Pair `x` and `y`, splitting rows into one series per group code.
    ///
    /// Rows with a non-finite coordinate or a missing group code are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` and `y` differ in length.
    pub fn from_columns(x: &[f64], y: &[f64], groups: Option<(&[String], &[Option<usize>])>, colors: &[Rgba]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        let color = |i: usize| colors.get(i).copied().unwrap_or(Rgba::DARK_GRAY);

        let mut series: Vec<ScatterSeries> = match groups {
            Some((levels, _)) => levels
                .iter()
                .enumerate()
                .map(|(i, level)| ScatterSeries { label: Some(level.clone()), color: color(i), points: Vec::new() })
                .collect(),
            None => vec![ScatterSeries { label: None, color: color(0), points: Vec::new() }],
        };

        for (row, (&xv, &yv)) in x.iter().zip(y).enumerate() {
            if !(xv.is_finite() && yv.is_finite()) {
                continue;
            }
            let group = match groups {
                Some((_, codes)) => codes.get(row).copied().flatten(),
                None => Some(0),
            };
            if let Some(s) = group.and_then(|g| series.get_mut(g)) {
                s.points.push((xv, yv));
            }
        }

        Ok(Self { series })
    }

    /// Number of plotted points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub(crate) fn draw(&self, scene: &mut Scene, axes: &Axes) -> Result<()> {
        axes.draw_frame(scene);
        let xs: Vec<f64> = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)).collect();
        let ys: Vec<f64> = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)).collect();
        let (Some(x_ext), Some(y_ext)) = (finite_extent(&xs), finite_extent(&ys)) else { return Ok(()) };

        let x_scale = axes.x_scale(padded(x_ext.0, x_ext.1, 0.05))?;
        let y_scale = axes.y_scale(padded(y_ext.0, y_ext.1, 0.05))?;
        axes.draw_x_ticks(scene, &x_scale);
        axes.draw_y_ticks(scene, &y_scale);

        let radius = (axes.font * 0.35).max(2.5);
        for series in &self.series {
            for &(x, y) in &series.points {
                scene.push(Shape::Circle {
                    center: Point::new(x_scale.scale(x), y_scale.scale(y)),
                    radius,
                    fill: series.color,
                    stroke: Some(Stroke::new(Rgba::WHITE, 0.75)),
                });
            }
        }
        Ok(())
    }
}
