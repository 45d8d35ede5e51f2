//! Category-by-group layout shared by bar, box and violin charts.

use crate::color::Rgba;
use crate::scale::BandScale;

use super::axes::Axes;

/// Fraction of each category slot occupied by its group elements.
const SLOT_FILL: f32 = 0.8;

/// Category and optional hue codes for each row of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Grouping {
    pub(crate) categories: Vec<String>,
    pub(crate) codes: Vec<Option<usize>>,
    pub(crate) hue: Option<(Vec<String>, Vec<Option<usize>>)>,
}

impl Grouping {
    pub(crate) fn is_grouped(&self) -> bool {
        self.hue.is_some()
    }
}

/// Per-category, per-group summaries of one numeric column.
///
/// `cells[c][g]` summarizes the rows whose category is `categories[c]` and whose hue level
/// is `hue_levels[g]`. Without a hue there is exactly one group.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalChart<T> {
    /// Category names along the x axis, in plotting order.
    pub categories: Vec<String>,
    /// Hue levels, when grouped.
    pub hue_levels: Option<Vec<String>>,
    /// Color of each group.
    pub colors: Vec<Rgba>,
    /// Summaries indexed by category, then group; `None` for empty combinations.
    pub cells: Vec<Vec<Option<T>>>,
}

impl<T> CategoricalChart<T> {
    /// Summarize `values` by category codes and optional group codes.
    ///
    /// Rows with a missing code are skipped. `summarize` receives the values of one cell and
    /// returns `None` when they admit no summary.
    pub(crate) fn build<F>(grouping: Grouping, values: &[f64], colors: Vec<Rgba>, summarize: F) -> Self
    where
        F: Fn(&[f64]) -> Option<T>,
    {
        let Grouping { categories, codes: category_codes, hue } = grouping;
        let (hue_levels, hue_codes) = match hue {
            Some((levels, codes)) => (Some(levels), Some(codes)),
            None => (None, None),
        };
        let groups = hue_levels.as_ref().map_or(1, Vec::len);

        let mut buckets: Vec<Vec<Vec<f64>>> = vec![vec![Vec::new(); groups]; categories.len()];
        for (row, (&code, &value)) in category_codes.iter().zip(values).enumerate() {
            let group = match &hue_codes {
                Some(codes) => codes.get(row).copied().flatten(),
                None => Some(0),
            };
            if let (Some(c), Some(g)) = (code, group) {
                if let Some(bucket) = buckets.get_mut(c).and_then(|b| b.get_mut(g)) {
                    bucket.push(value);
                }
            }
        }

        let cells = buckets
            .iter()
            .map(|row| row.iter().map(|vals| summarize(vals)).collect())
            .collect();

        Self { categories, hue_levels, colors, cells }
    }

    /// Number of groups per category.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.hue_levels.as_ref().map_or(1, Vec::len)
    }

    /// Summary at `(category, group)`.
    #[must_use]
    pub fn cell(&self, category: usize, group: usize) -> Option<&T> {
        self.cells.get(category)?.get(group)?.as_ref()
    }

    /// Color of `group`.
    #[must_use]
    pub fn color(&self, group: usize) -> Rgba {
        self.colors.get(group).copied().unwrap_or(Rgba::DARK_GRAY)
    }

    /// Every present summary with its position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.cells.iter().enumerate().flat_map(|(c, row)| {
            row.iter().enumerate().filter_map(move |(g, cell)| cell.as_ref().map(|t| (c, g, t)))
        })
    }
}

/// Horizontal placement of group elements inside category bands.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dodge {
    bands: BandScale,
    groups: usize,
}

impl Dodge {
    pub(crate) fn new(bands: BandScale, groups: usize) -> Self {
        Self { bands, groups: groups.max(1) }
    }

    /// Width available to one group element.
    pub(crate) fn width(&self) -> f32 {
        self.bands.bandwidth() * SLOT_FILL / self.groups as f32
    }

    /// Center x of `group` within `category`.
    pub(crate) fn center(&self, category: usize, group: usize) -> f32 {
        let slot = self.bands.bandwidth() * SLOT_FILL;
        let left = self.bands.center(category) - slot / 2.0;
        left + (group as f32 + 0.5) * self.width()
    }

    pub(crate) fn bands(&self) -> &BandScale {
        &self.bands
    }
}

/// Lowest and highest value over all present cells.
pub(crate) fn extent<T>(chart: &CategoricalChart<T>, range: impl Fn(&T) -> (f64, f64)) -> Option<(f64, f64)> {
    chart.iter().map(|(_, _, t)| range(t)).fold(None, |acc, (lo, hi)| match acc {
        None => Some((lo, hi)),
        Some((a, b)) => Some((a.min(lo), b.max(hi))),
    })
}

/// Category bands across the plot area, or `None` without categories.
pub(crate) fn dodge_for<T>(chart: &CategoricalChart<T>, axes: &Axes) -> Option<Dodge> {
    axes.x_bands(chart.categories.len()).map(|b| Dodge::new(b, chart.group_count()))
}
