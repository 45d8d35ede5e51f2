//! Error types for trueno-dataviz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-dataviz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, terminal output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Data length mismatch between paired arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., equal domain bounds).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// A column name that is not present in the dataset.
    #[error("Column not found: '{name}'")]
    ColumnNotFound {
        /// Requested column name.
        name: String,
    },

    /// A column name that is already present in the dataset.
    #[error("Duplicate column: '{name}'")]
    DuplicateColumn {
        /// Column name.
        name: String,
    },

    /// A column whose length differs from the dataset's row count.
    #[error("Column '{name}' has {actual} rows, dataset has {expected}")]
    ColumnLengthMismatch {
        /// Column name.
        name: String,
        /// Row count of the dataset.
        expected: usize,
        /// Row count of the rejected column.
        actual: usize,
    },

    /// A column used where numeric values are required.
    #[error("Column '{name}' is not numeric")]
    NotNumeric {
        /// Column name.
        name: String,
    },

    /// Hue display labels that do not match the hue categories one-to-one.
    #[error("{labels} hue labels supplied for {categories} hue categories")]
    HueLabelMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of categories in the hue column.
        categories: usize,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}
