//! Chart types drawn by a [`Figure`](crate::figure::Figure).
//!
//! Each chart holds the summarized data it shows and lays itself out inside the plot area
//! it is given.

mod axes;
mod bar;
mod boxplot;
mod categorical;
mod heatmap;
mod histogram;
mod scatter;

pub(crate) use axes::{Axes, INK};
pub(crate) use categorical::Grouping;

pub use bar::BarChart;
pub use boxplot::{BoxChart, ViolinBody, ViolinChart};
pub use categorical::CategoricalChart;
pub use heatmap::HeatmapChart;
pub use histogram::HistogramChart;
pub use scatter::{ScatterChart, ScatterSeries};
