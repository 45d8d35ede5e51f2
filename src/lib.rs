//! # Trueno-DataViz
//!
//! One-call statistical charts over tabular datasets.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library, trueno-dataviz takes a
//! [`Dataset`](data::Dataset) of named columns and renders, in one call each:
//!
//! - an annotated Pearson correlation heatmap of every numeric column (the matrix is returned)
//! - a histogram with a kernel density overlay per numeric column
//! - bar, scatter, box and violin charts of two columns, optionally grouped by a hue column
//!
//! Every chart becomes a [`Figure`](figure::Figure) handed to a
//! [`RenderBackend`](backend::RenderBackend): SVG documents, PNG files, a terminal, or a
//! recorder for tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_dataviz::prelude::*;
//!
//! let df = Dataset::new()
//!     .with_column("age", vec![25_i64, 30, 35])?
//!     .with_column("salary", vec![50_000.0, 60_000.0, 75_000.0])?
//!     .with_column("dept", vec!["A", "A", "B"])?;
//!
//! let mut viz = DataVisualizer::new(&df, SvgBackend::new());
//! let corr = viz.create_heatmap(&df)?;
//! assert!(corr.get_by_name("age", "salary").unwrap_or(0.0) > 0.99);
//!
//! viz.create_histplot(&df)?;
//! viz.create_violinplot(&df, &ChartRequest::new("dept", "salary", "Salary by department"))?;
//! assert_eq!(viz.backend().documents().len(), 4);
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable parallel processing with rayon
//!
//! ## Academic References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Silverman, B. W. (1986). *Density Estimation for Statistics and Data Analysis*.
//! - Freedman, D., & Diaconis, P. (1981). "On the histogram as a density estimator."
//! - Moreland, K. (2009). "Diverging Color Maps for Scientific Visualization." ISVC.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Data and Statistics
// ============================================================================

/// Tabular datasets and their numeric projection.
pub mod data;

/// Correlation, density estimation and descriptive statistics.
pub mod stats;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Chart types (heatmap, histogram, bar, scatter, box, violin).
pub mod plots;

/// Figures: charts plus titles, labels, legends and size.
pub mod figure;

/// The one-call visualizer façade.
pub mod visualizer;

/// Visualizer configuration.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Scenes and rasterization.
pub mod render;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

/// Render backends receiving finished figures.
pub mod backend;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-dataviz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_dataviz::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::backend::{NullBackend, PngBackend, RecordingBackend, RenderBackend, SvgBackend, TerminalBackend};
    pub use crate::color::{Palette, Rgba};
    pub use crate::config::VisualizerConfig;
    pub use crate::data::{Dataset, NumericProjection};
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Chart, ChartKind, Figure, FigureSize, Legend, LegendPosition, Style};
    pub use crate::output::TerminalMode;
    pub use crate::stats::{BinStrategy, CorrelationMatrix};
    pub use crate::visualizer::{ChartRequest, DataVisualizer};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
