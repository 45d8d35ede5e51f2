//! Figures: one fully resolved chart plus its cosmetics.
//!
//! A [`Figure`] is what the visualizer hands to a [`RenderBackend`](crate::backend::RenderBackend).
//! It carries computed chart data, never a reference to the source dataset, so backends
//! can keep or re-render it freely.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output::{SvgEncoder, TextAnchor};
use crate::plots::{Axes, BarChart, BoxChart, HeatmapChart, HistogramChart, ScatterChart, ViolinChart, INK};
use crate::render::{Label, Scene, Stroke};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    /// Width in inches.
    pub width: f32,
    /// Height in inches.
    pub height: f32,
}

impl FigureSize {
    /// Create a size in inches.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions at `dpi`, at least one pixel each way.
    #[must_use]
    pub fn pixels(&self, dpi: u32) -> (u32, u32) {
        let px = |inches: f32| ((inches * dpi as f32).round() as u32).max(1);
        (px(self.width), px(self.height))
    }
}

/// Background and grid treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Plain white background with left and bottom spines.
    #[default]
    White,
    /// White background with light grid lines at every tick.
    WhiteGrid,
}

/// Corner of the plot area the legend sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    /// Top right corner.
    #[default]
    UpperRight,
    /// Top left corner.
    UpperLeft,
    /// Bottom left corner.
    LowerLeft,
    /// Bottom right corner.
    LowerRight,
}

/// Legend mapping display labels to group colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Heading above the entries.
    pub title: Option<String>,
    /// Display strings in group order.
    pub labels: Vec<String>,
    /// Swatch color of each entry.
    pub colors: Vec<Rgba>,
    /// Placement.
    pub position: LegendPosition,
}

/// Chart type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Correlation heatmap.
    Heatmap,
    /// Histogram with density overlay.
    Histogram,
    /// Bar chart of group means.
    Bar,
    /// Scatter chart.
    Scatter,
    /// Box plot.
    Box,
    /// Violin plot.
    Violin,
}

impl ChartKind {
    /// Lowercase name, used in file names and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ChartKind::Heatmap => "heatmap",
            ChartKind::Histogram => "histogram",
            ChartKind::Bar => "barplot",
            ChartKind::Scatter => "scatterplot",
            ChartKind::Box => "boxplot",
            ChartKind::Violin => "violinplot",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved chart data.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    /// Annotated correlation grid.
    Heatmap(HeatmapChart),
    /// Binned counts with a density curve.
    Histogram(HistogramChart),
    /// Mean per category.
    Bar(BarChart),
    /// Point cloud.
    Scatter(ScatterChart),
    /// Quartile boxes per category.
    Box(BoxChart),
    /// Mirrored densities per category.
    Violin(ViolinChart),
}

impl Chart {
    /// The chart type.
    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        match self {
            Chart::Heatmap(_) => ChartKind::Heatmap,
            Chart::Histogram(_) => ChartKind::Histogram,
            Chart::Bar(_) => ChartKind::Bar,
            Chart::Scatter(_) => ChartKind::Scatter,
            Chart::Box(_) => ChartKind::Box,
            Chart::Violin(_) => ChartKind::Violin,
        }
    }
}

/// A chart with title, axis labels, size, style and optional legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Title above the plot area.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Physical size.
    pub size: FigureSize,
    /// Pixels per inch.
    pub dpi: u32,
    /// Background treatment.
    pub style: Style,
    /// Legend, if any.
    pub legend: Option<Legend>,
    /// The chart itself.
    pub chart: Chart,
}

impl Figure {
    /// Default resolution.
    pub const DEFAULT_DPI: u32 = 100;

    /// A 10x10 in, white-style figure without labels or legend.
    #[must_use]
    pub fn new(chart: Chart) -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            size: FigureSize::new(10.0, 10.0),
            dpi: Self::DEFAULT_DPI,
            style: Style::default(),
            legend: None,
            chart,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set both axis labels.
    #[must_use]
    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Set the size in inches.
    #[must_use]
    pub fn size(mut self, size: FigureSize) -> Self {
        self.size = size;
        self
    }

    /// Set the resolution.
    #[must_use]
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Attach a legend.
    #[must_use]
    pub fn legend(mut self, legend: Option<Legend>) -> Self {
        self.legend = legend;
        self
    }

    /// The chart type.
    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        self.chart.kind()
    }

    /// Canvas size in pixels.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        self.size.pixels(self.dpi)
    }

    /// Lay the figure out as a scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is zero or a chart's values cannot be placed on an axis.
    pub fn to_scene(&self) -> Result<Scene> {
        if self.dpi == 0 {
            return Err(Error::InvalidDimensions { width: 0, height: 0 });
        }
        let (width, height) = self.pixel_size();
        let mut scene = Scene::new(width, height, Rgba::WHITE);
        let axes = Axes::new(width, height, self.style);

        match &self.chart {
            Chart::Heatmap(c) => c.draw(&mut scene, &axes)?,
            Chart::Histogram(c) => c.draw(&mut scene, &axes)?,
            Chart::Bar(c) => c.draw(&mut scene, &axes)?,
            Chart::Scatter(c) => c.draw(&mut scene, &axes)?,
            Chart::Box(c) => c.draw(&mut scene, &axes)?,
            Chart::Violin(c) => c.draw(&mut scene, &axes)?,
        }

        self.draw_annotations(&mut scene, &axes);
        if let Some(legend) = &self.legend {
            draw_legend(&mut scene, &axes, legend);
        }
        Ok(scene)
    }

    /// Rasterize the figure. Text is not rasterized.
    ///
    /// # Errors
    ///
    /// Returns an error if layout or rasterization fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        self.to_scene()?.rasterize()
    }

    /// Render the figure as a vector SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if layout fails.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        Ok(self.to_scene()?.to_svg())
    }

    fn draw_annotations(&self, scene: &mut Scene, axes: &Axes) {
        let a = axes.area;
        let font = axes.font;

        if !self.title.is_empty() {
            scene.text(
                Label::new(Point::new(a.center().x, a.y - font), self.title.clone(), font * 1.2, INK)
                    .anchor(TextAnchor::Middle),
            );
        }
        if !self.x_label.is_empty() {
            scene.text(
                Label::new(Point::new(a.center().x, a.bottom() + font * 3.5), self.x_label.clone(), font * 1.1, INK)
                    .anchor(TextAnchor::Middle),
            );
        }
        if !self.y_label.is_empty() {
            scene.text(
                Label::new(Point::new(font * 1.5, a.center().y), self.y_label.clone(), font * 1.1, INK)
                    .anchor(TextAnchor::Middle)
                    .rotated(-90.0),
            );
        }
    }
}

impl batuta_common::display::WithDimensions for Figure {
    /// Resize to `width` x `height` pixels at the current resolution.
    fn set_dimensions(&mut self, width: u32, height: u32) {
        let dpi = self.dpi.max(1) as f32;
        self.size = FigureSize::new(width as f32 / dpi, height as f32 / dpi);
    }
}

fn draw_legend(scene: &mut Scene, axes: &Axes, legend: &Legend) {
    let font = axes.font;
    let row = font * 1.6;
    let swatch = font;

    let longest = legend
        .labels
        .iter()
        .chain(legend.title.iter())
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0) as f32;
    let width = swatch + font * 1.5 + longest * font * 0.6;
    let rows = legend.labels.len() as f32 + if legend.title.is_some() { 1.0 } else { 0.0 };
    let height = rows * row + font * 0.6;

    let a = axes.area;
    let margin = font * 0.5;
    let x = match legend.position {
        LegendPosition::UpperRight | LegendPosition::LowerRight => a.right() - width - margin,
        LegendPosition::UpperLeft | LegendPosition::LowerLeft => a.x + margin,
    };
    let y = match legend.position {
        LegendPosition::UpperRight | LegendPosition::UpperLeft => a.y + margin,
        LegendPosition::LowerRight | LegendPosition::LowerLeft => a.bottom() - height - margin,
    };

    scene.rect(
        Rect::new(x, y, width, height),
        Rgba::WHITE.with_alpha(204),
        Some(Stroke::new(Rgba::LIGHT_GRAY, 1.0)),
    );

    let mut baseline = y + font * 0.3 + row * 0.7;
    if let Some(title) = &legend.title {
        scene.text(Label::new(Point::new(x + font * 0.5, baseline), title.clone(), font, INK));
        baseline += row;
    }
    for (label, color) in legend.labels.iter().zip(&legend.colors) {
        scene.rect(Rect::new(x + font * 0.5, baseline - swatch * 0.85, swatch, swatch * 0.8), *color, None);
        scene.text(Label::new(Point::new(x + font + swatch, baseline), label.clone(), font, INK));
        baseline += row;
    }
}
