//! Tabular datasets.
//!
//! A [`Dataset`] is an ordered collection of named, typed, equal-length columns.
//! Floating-point `NaN` marks a missing value.

mod projection;

pub use projection::NumericProjection;

use crate::error::{Error, Result};

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integers.
    Int,
    /// 64-bit floats.
    Float,
    /// Booleans.
    Bool,
    /// Categorical strings.
    Categorical,
}

impl DataType {
    /// Whether columns of this type belong to the numeric projection.
    ///
    /// Booleans are not numeric here.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}

/// Homogeneous column values.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Integer values.
    Int(Vec<i64>),
    /// Float values; `NaN` is missing.
    Float(Vec<f64>),
    /// Boolean values.
    Bool(Vec<bool>),
    /// Categorical values.
    Categorical(Vec<String>),
}

impl ColumnData {
    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    /// Whether the column has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared type.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Bool(_) => DataType::Bool,
            ColumnData::Categorical(_) => DataType::Categorical,
        }
    }

    /// Values as `f64`, or `None` for non-numeric columns.
    #[must_use]
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            ColumnData::Int(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ColumnData::Float(v) => Some(v.clone()),
            ColumnData::Bool(_) | ColumnData::Categorical(_) => None,
        }
    }

    /// Display string of each value.
    #[must_use]
    pub fn to_labels(&self) -> Vec<String> {
        match self {
            ColumnData::Int(v) => v.iter().map(ToString::to_string).collect(),
            ColumnData::Float(v) => v.iter().map(|x| format_level(*x)).collect(),
            ColumnData::Bool(v) => v.iter().map(ToString::to_string).collect(),
            ColumnData::Categorical(v) => v.clone(),
        }
    }
}

fn format_level(x: f64) -> String {
    // Adding +0.0 turns -0.0 into 0.0 so both format as one level
    let x = x + 0.0;
    if x.is_nan() {
        "NaN".to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{x:.1}")
    } else {
        x.to_string()
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(v: Vec<i64>) -> Self {
        ColumnData::Int(v)
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(v: Vec<f64>) -> Self {
        ColumnData::Float(v)
    }
}

impl From<Vec<bool>> for ColumnData {
    fn from(v: Vec<bool>) -> Self {
        ColumnData::Bool(v)
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(v: Vec<String>) -> Self {
        ColumnData::Categorical(v)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        ColumnData::Categorical(v.into_iter().map(str::to_string).collect())
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column.
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self { name: name.into(), data: data.into() }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values.
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Declared type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    /// Values as `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotNumeric`] for boolean and categorical columns.
    pub fn numeric_values(&self) -> Result<Vec<f64>> {
        self.data.to_f64().ok_or_else(|| Error::NotNumeric { name: self.name.clone() })
    }

    /// Distinct values in plotting order.
    ///
    /// Numeric levels sort ascending; categorical and boolean levels keep first-appearance
    /// order. Missing float values are not a level.
    #[must_use]
    pub fn levels(&self) -> Vec<String> {
        match &self.data {
            ColumnData::Int(v) => {
                let mut sorted = v.clone();
                sorted.sort_unstable();
                sorted.dedup();
                sorted.iter().map(ToString::to_string).collect()
            }
            ColumnData::Float(v) => {
                let mut sorted: Vec<f64> =
                    v.iter().copied().filter(|x| !x.is_nan()).map(|x| x + 0.0).collect();
                sorted.sort_by(f64::total_cmp);
                sorted.dedup();
                sorted.into_iter().map(format_level).collect()
            }
            ColumnData::Bool(_) | ColumnData::Categorical(_) => {
                let mut levels: Vec<String> = Vec::new();
                for label in self.data.to_labels() {
                    if !levels.contains(&label) {
                        levels.push(label);
                    }
                }
                levels
            }
        }
    }

    /// Level index of every row, `None` for missing values.
    #[must_use]
    pub fn level_codes(&self) -> (Vec<String>, Vec<Option<usize>>) {
        let levels = self.levels();
        let labels = self.data.to_labels();
        let missing: Vec<bool> = match &self.data {
            ColumnData::Float(v) => v.iter().map(|x| x.is_nan()).collect(),
            _ => vec![false; labels.len()],
        };
        let codes = labels
            .iter()
            .zip(missing)
            .map(|(label, is_missing)| {
                if is_missing {
                    None
                } else {
                    levels.iter().position(|l| l == label)
                }
            })
            .collect();
        (levels, codes)
    }
}

/// An ordered collection of named, equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style.
    ///
    /// # Errors
    ///
    /// See [`Dataset::push_column`].
    pub fn with_column(mut self, name: impl Into<String>, data: impl Into<ColumnData>) -> Result<Self> {
        self.push_column(Column::new(name, data))?;
        Ok(self)
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the length differs from existing columns.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(Error::DuplicateColumn { name: column.name });
        }
        if let Some(first) = self.columns.first() {
            let expected = first.data.len();
            if column.data.len() != expected {
                return Err(Error::ColumnLengthMismatch {
                    name: column.name,
                    expected,
                    actual: column.data.len(),
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Look up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if no column has this name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::ColumnNotFound { name: name.to_string() })
    }

    /// Whether a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Values of a numeric column as `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or not numeric.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?.numeric_values()
    }

    /// Distinct values of a column in plotting order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if no column has this name.
    pub fn categories(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.column(name)?.levels())
    }

    /// Per-row display strings of a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if no column has this name.
    pub fn labels(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.column(name)?.data().to_labels())
    }

    /// All columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }
}
