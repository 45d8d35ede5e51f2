//! The one-call chart façade.
//!
//! [`DataVisualizer`] snapshots the numeric columns of a dataset once, then turns each
//! `create_*` call into a fully resolved [`Figure`] and hands it to its [`RenderBackend`].
//!
//! # Example
//!
//! ```
//! use trueno_dataviz::prelude::*;
//!
//! let df = Dataset::new()
//!     .with_column("age", vec![25_i64, 30, 35])?
//!     .with_column("salary", vec![50_000.0, 60_000.0, 75_000.0])?
//!     .with_column("dept", vec!["A", "A", "B"])?;
//!
//! let mut viz = DataVisualizer::new(&df, RecordingBackend::new());
//! let corr = viz.create_heatmap(&df)?;
//! assert_eq!(corr.len(), 2);
//!
//! viz.create_barplot(&df, &ChartRequest::new("dept", "salary", "Salary by department"))?;
//! assert_eq!(viz.backend().len(), 2);
//! # Ok::<(), trueno_dataviz::Error>(())
//! ```

use log::{debug, info, warn};

use crate::backend::RenderBackend;
use crate::color::Rgba;
use crate::config::VisualizerConfig;
use crate::data::{Dataset, NumericProjection};
use crate::error::{Error, Result};
use crate::figure::{Chart, Figure, Legend, Style};
use crate::plots::{BarChart, BoxChart, Grouping, HeatmapChart, HistogramChart, ScatterChart, ViolinChart};
use crate::stats::CorrelationMatrix;

/// Title of the correlation heatmap.
pub const HEATMAP_TITLE: &str = "Correlation Matrix";

/// Axis bindings and cosmetics of one bar, scatter, box or violin chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    /// Column on the horizontal axis.
    pub x: String,
    /// Column on the vertical axis.
    pub y: String,
    /// Chart title.
    pub title: String,
    /// Column whose values split and color the chart.
    pub hue: Option<String>,
    /// Legend strings for the hue levels, in level order.
    pub hue_labels: Option<Vec<String>>,
}

impl ChartRequest {
    /// Ungrouped chart of `y` against `x`.
    pub fn new(x: impl Into<String>, y: impl Into<String>, title: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into(), title: title.into(), hue: None, hue_labels: None }
    }

    /// Group by `column`.
    #[must_use]
    pub fn hue(mut self, column: impl Into<String>) -> Self {
        self.hue = Some(column.into());
        self
    }

    /// Legend strings for the hue levels.
    #[must_use]
    pub fn hue_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hue_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

/// Hue levels, row codes and the legend they imply.
struct HueGroups {
    levels: Vec<String>,
    codes: Vec<Option<usize>>,
    legend: Option<Legend>,
}

/// Renders statistical charts of a dataset through a backend.
#[derive(Debug)]
pub struct DataVisualizer<B: RenderBackend> {
    projection: NumericProjection,
    config: VisualizerConfig,
    backend: B,
}

impl<B: RenderBackend> DataVisualizer<B> {
    /// Snapshot the numeric columns of `dataset`.
    ///
    /// A dataset without numeric columns is accepted; heatmaps and histograms of it are empty.
    pub fn new(dataset: &Dataset, backend: B) -> Self {
        let projection = NumericProjection::from_dataset(dataset);
        if projection.is_empty() {
            warn!("dataset has no numeric columns");
        } else {
            debug!("numeric projection: {:?}", projection.names());
        }
        Self { projection, config: VisualizerConfig::default(), backend }
    }

    /// Replace the chart defaults.
    #[must_use]
    pub fn with_config(mut self, config: VisualizerConfig) -> Self {
        debug!("visualizer config: {config:?}");
        self.config = config;
        self
    }

    /// Chart defaults in use.
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// The numeric columns captured at construction or the last [`refresh`](Self::refresh).
    pub fn numeric_projection(&self) -> &NumericProjection {
        &self.projection
    }

    /// Re-snapshot the numeric columns of `dataset`.
    pub fn refresh(&mut self, dataset: &Dataset) {
        self.projection = NumericProjection::from_dataset(dataset);
        debug!("numeric projection refreshed: {:?}", self.projection.names());
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Take back the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Render an annotated Pearson correlation heatmap of the numeric columns and return
    /// the matrix.
    ///
    /// Nothing is rendered for an empty projection; the returned matrix is then empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if a projected column is absent from `dataset`, or
    /// any backend error.
    pub fn create_heatmap(&mut self, dataset: &Dataset) -> Result<CorrelationMatrix> {
        for name in self.projection.names() {
            dataset.column(name)?;
        }
        let matrix = CorrelationMatrix::from_projection(&self.projection);
        if matrix.is_empty() {
            warn!("no numeric columns, heatmap skipped");
            return Ok(matrix);
        }

        let chart = HeatmapChart::new(matrix.clone())
            .precision(self.config.annotation_precision)
            .line_width(self.config.grid_line_width);
        let figure = Figure::new(Chart::Heatmap(chart)).title(HEATMAP_TITLE).size(self.config.heatmap_size);
        self.render(figure)?;
        Ok(matrix)
    }

    /// Render one histogram with a density curve per numeric column, in column order.
    ///
    /// # Errors
    ///
    /// Returns an error if a projected column is absent from `dataset` or no longer numeric,
    /// or any backend error.
    pub fn create_histplot(&mut self, dataset: &Dataset) -> Result<()> {
        if self.projection.is_empty() {
            warn!("no numeric columns, histograms skipped");
            return Ok(());
        }

        let color = self.config.palette.color(0);
        let names: Vec<String> = self.projection.names().to_vec();
        for name in names {
            let values = dataset.numeric_values(&name)?;
            let chart = HistogramChart::from_values(name.as_str(), &values, self.config.bins, self.config.kde_points, color);
            if chart.density.is_none() {
                warn!("column '{name}' has no spread, density curve omitted");
            }
            let figure = Figure::new(Chart::Histogram(chart))
                .title(format!("Distribution of {name}"))
                .labels(name.as_str(), "frequency")
                .size(self.config.histogram_size);
            self.render(figure)?;
        }
        Ok(())
    }

    /// Render the mean of `y` per category of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested column is missing, `y` is not numeric, or the hue
    /// labels do not match the hue levels.
    pub fn create_barplot(&mut self, dataset: &Dataset, request: &ChartRequest) -> Result<()> {
        let (grouping, values, legend) = self.categorical(dataset, request)?;
        let colors = self.group_colors(&grouping);
        let chart = BarChart::means(grouping, &values, colors);
        self.render(self.chart_figure(Chart::Bar(chart), request, Style::WhiteGrid, legend))
    }

    /// Render `y` against `x` as points.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested column is missing, `x` or `y` is not numeric, or the
    /// hue labels do not match the hue levels.
    pub fn create_scatterplot(&mut self, dataset: &Dataset, request: &ChartRequest) -> Result<()> {
        let x_column = dataset.column(&request.x)?;
        let y_column = dataset.column(&request.y)?;
        let hue = self.hue_groups(dataset, request)?;
        let (xs, ys) = (x_column.numeric_values()?, y_column.numeric_values()?);

        let chart = match &hue {
            Some(h) => {
                let colors = self.config.palette.colors(h.levels.len());
                ScatterChart::from_columns(&xs, &ys, Some((h.levels.as_slice(), h.codes.as_slice())), &colors)?
            }
            None => ScatterChart::from_columns(&xs, &ys, None, &[self.config.palette.color(0)])?,
        };
        let legend = hue.and_then(|h| h.legend);
        self.render(self.chart_figure(Chart::Scatter(chart), request, Style::WhiteGrid, legend))
    }

    /// Render the quartiles of `y` per category of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested column is missing, `y` is not numeric, or the hue
    /// labels do not match the hue levels.
    pub fn create_boxplot(&mut self, dataset: &Dataset, request: &ChartRequest) -> Result<()> {
        let (grouping, values, legend) = self.categorical(dataset, request)?;
        let colors = self.group_colors(&grouping);
        let chart = BoxChart::quartiles(grouping, &values, colors);
        self.render(self.chart_figure(Chart::Box(chart), request, Style::White, legend))
    }

    /// Render the distribution of `y` per category of `x` as mirrored densities.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested column is missing, `y` is not numeric, or the hue
    /// labels do not match the hue levels.
    pub fn create_violinplot(&mut self, dataset: &Dataset, request: &ChartRequest) -> Result<()> {
        let (grouping, values, legend) = self.categorical(dataset, request)?;
        let colors = self.group_colors(&grouping);
        let chart = ViolinChart::densities(grouping, &values, colors);
        self.render(self.chart_figure(Chart::Violin(chart), request, Style::White, legend))
    }

    /// Resolve a categorical x, numeric y and optional hue.
    fn categorical(&self, dataset: &Dataset, request: &ChartRequest) -> Result<(Grouping, Vec<f64>, Option<Legend>)> {
        let x_column = dataset.column(&request.x)?;
        let y_column = dataset.column(&request.y)?;
        let hue = self.hue_groups(dataset, request)?;
        let values = y_column.numeric_values()?;

        let (categories, codes) = x_column.level_codes();
        debug!("'{}' has {} categories", request.x, categories.len());
        let (hue, legend) = match hue {
            Some(h) => (Some((h.levels, h.codes)), h.legend),
            None => (None, None),
        };
        Ok((Grouping { categories, codes, hue }, values, legend))
    }

    fn hue_groups(&self, dataset: &Dataset, request: &ChartRequest) -> Result<Option<HueGroups>> {
        let Some(hue) = &request.hue else {
            if request.hue_labels.is_some() {
                debug!("hue labels without a hue column are ignored");
            }
            return Ok(None);
        };
        let (levels, codes) = dataset.column(hue)?.level_codes();

        let legend = match &request.hue_labels {
            Some(labels) if labels.len() != levels.len() => {
                return Err(Error::HueLabelMismatch { labels: labels.len(), categories: levels.len() });
            }
            Some(labels) => Some(Legend {
                title: Some(self.config.legend_title.clone().unwrap_or_else(|| hue.clone())),
                labels: labels.clone(),
                colors: self.config.palette.colors(levels.len()),
                position: self.config.legend_position,
            }),
            None => None,
        };
        debug!("hue '{hue}' levels: {levels:?}");
        Ok(Some(HueGroups { levels, codes, legend }))
    }

    fn group_colors(&self, grouping: &Grouping) -> Vec<Rgba> {
        match &grouping.hue {
            Some((levels, _)) => self.config.palette.colors(levels.len()),
            None => vec![self.config.palette.color(0)],
        }
    }

    fn chart_figure(&self, chart: Chart, request: &ChartRequest, style: Style, legend: Option<Legend>) -> Figure {
        Figure::new(chart)
            .title(request.title.as_str())
            .labels(request.x.as_str(), request.y.as_str())
            .size(self.config.chart_size)
            .style(style)
            .legend(legend)
    }

    fn render(&mut self, figure: Figure) -> Result<()> {
        let figure = figure.dpi(self.config.dpi);
        info!("rendering {} '{}' via {} backend", figure.kind(), figure.title, self.backend.id());
        self.backend.render(&figure)
    }
}
