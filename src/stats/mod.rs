//! Statistics behind the charts.

mod correlation;
mod density;
mod summary;

pub use correlation::{pearson, CorrelationMatrix};
pub use density::DensityCurve;
pub use summary::{percentile, BinStrategy, Bins, BoxStats, MeanEstimate};
