//! Visualizer configuration.
//!
//! Supports YAML configuration with precedence: explicit builder value > file > defaults.

use crate::color::Palette;
use crate::error::{Error, Result};
use crate::figure::{FigureSize, LegendPosition};
use crate::stats::BinStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chart defaults applied by the visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Pixels per inch.
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Size of the correlation heatmap.
    #[serde(default = "default_heatmap_size")]
    pub heatmap_size: FigureSize,

    /// Size of each per-column histogram.
    #[serde(default = "default_histogram_size")]
    pub histogram_size: FigureSize,

    /// Size of bar, scatter, box and violin charts.
    #[serde(default = "default_chart_size")]
    pub chart_size: FigureSize,

    /// Histogram binning rule.
    #[serde(default)]
    pub bins: BinStrategy,

    /// Grid points of each density curve.
    #[serde(default = "default_kde_points")]
    pub kde_points: usize,

    /// Decimal places of heatmap annotations.
    #[serde(default = "default_annotation_precision")]
    pub annotation_precision: usize,

    /// Width of the lines separating heatmap cells.
    #[serde(default = "default_grid_line_width")]
    pub grid_line_width: f32,

    /// Legend heading; the hue column name when unset.
    #[serde(default)]
    pub legend_title: Option<String>,

    /// Legend placement.
    #[serde(default)]
    pub legend_position: LegendPosition,

    /// Group colors.
    #[serde(default)]
    pub palette: Palette,
}

fn default_dpi() -> u32 {
    100
}
fn default_heatmap_size() -> FigureSize {
    FigureSize::new(10.0, 10.0)
}
fn default_histogram_size() -> FigureSize {
    FigureSize::new(2.0, 2.0)
}
fn default_chart_size() -> FigureSize {
    FigureSize::new(10.0, 10.0)
}
fn default_kde_points() -> usize {
    200
}
fn default_annotation_precision() -> usize {
    2
}
fn default_grid_line_width() -> f32 {
    0.5
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            heatmap_size: default_heatmap_size(),
            histogram_size: default_histogram_size(),
            chart_size: default_chart_size(),
            bins: BinStrategy::default(),
            kde_points: default_kde_points(),
            annotation_precision: default_annotation_precision(),
            grid_line_width: default_grid_line_width(),
            legend_title: None,
            legend_position: LegendPosition::default(),
            palette: Palette::default(),
        }
    }
}

impl VisualizerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with the line number if parsing fails, or if a value is out of range.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config(format!("line {line}: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(Error::Config("dpi must be positive".into()));
        }
        for (name, size) in [
            ("heatmap_size", self.heatmap_size),
            ("histogram_size", self.histogram_size),
            ("chart_size", self.chart_size),
        ] {
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(Error::Config(format!("{name} must be positive")));
            }
        }
        if self.grid_line_width < 0.0 {
            return Err(Error::Config("grid_line_width must not be negative".into()));
        }
        Ok(())
    }

    /// Set the resolution.
    #[must_use]
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the histogram binning rule.
    #[must_use]
    pub fn bins(mut self, bins: BinStrategy) -> Self {
        self.bins = bins;
        self
    }

    /// Set the legend heading.
    #[must_use]
    pub fn legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_title = Some(title.into());
        self
    }

    /// Set the group palette.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
