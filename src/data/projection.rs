//! Numeric-only view of a dataset.

use super::{Column, Dataset};

/// Snapshot of a dataset's integer and float columns, in their original relative order.
///
/// Taken once; later changes to the source dataset are not reflected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericProjection {
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl NumericProjection {
    /// Project `dataset` onto its numeric columns.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let (names, values) = dataset
            .columns()
            .iter()
            .filter(|c| c.data_type().is_numeric())
            .filter_map(|c: &Column| Some((c.name().to_string(), c.data().to_f64()?)))
            .unzip();
        Self { names, values }
    }

    /// Column names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values of the `index`-th projected column.
    #[must_use]
    pub fn values(&self, index: usize) -> Option<&[f64]> {
        self.values.get(index).map(Vec::as_slice)
    }

    /// Iterate `(name, values)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names.iter().map(String::as_str).zip(self.values.iter().map(Vec::as_slice))
    }

    /// Number of projected columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the dataset had no numeric columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_projection_keeps_numeric_in_order() {
        let df = Dataset::new()
            .with_column("dept", vec!["A", "B"])
            .and_then(|d| d.with_column("salary", vec![1.0, 2.0]))
            .and_then(|d| d.with_column("remote", vec![true, false]))
            .and_then(|d| d.with_column("age", vec![30_i64, 40]))
            .unwrap();

        let proj = NumericProjection::from_dataset(&df);
        assert_eq!(proj.names(), &["salary".to_string(), "age".to_string()]);
        assert_eq!(proj.values(1), Some(&[30.0, 40.0][..]));
        assert_eq!(proj.values(2), None);
    }

    #[test]
    fn test_projection_of_non_numeric_dataset_is_empty() {
        let df = Dataset::new().with_column("dept", vec!["A"]).unwrap();
        let proj = NumericProjection::from_dataset(&df);
        assert!(proj.is_empty());
        assert_eq!(proj.iter().count(), 0);
    }

    fn column_kinds() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..4, 0..12)
    }

    proptest! {
        #[test]
        fn prop_projection_is_ordered_numeric_subset(kinds in column_kinds()) {
            let mut df = Dataset::new();
            let mut expected = Vec::new();
            for (i, kind) in kinds.iter().enumerate() {
                let name = format!("c{i}");
                let column = match kind {
                    0 => Column::new(name.clone(), vec![i as i64, 1]),
                    1 => Column::new(name.clone(), vec![i as f64, 0.5]),
                    2 => Column::new(name.clone(), vec![true, false]),
                    _ => Column::new(name.clone(), vec!["x", "y"]),
                };
                if *kind < 2 {
                    expected.push(name);
                }
                df.push_column(column).unwrap();
            }

            let proj = NumericProjection::from_dataset(&df);
            prop_assert_eq!(proj.names(), expected.as_slice());
            for name in proj.names() {
                prop_assert!(df.has_column(name));
            }
        }
    }
}
