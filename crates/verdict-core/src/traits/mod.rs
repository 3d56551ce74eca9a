//! Core traits for the engine.

mod indicator;
mod series_source;

pub use indicator::{Indicator, MultiOutputIndicator};
pub use series_source::SeriesSource;
