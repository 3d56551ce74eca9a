//! Core data types for the engine.

mod enriched;
mod horizon;
mod lookback;
mod price;
mod recommendation;
mod signal;

pub use enriched::EnrichedPoint;
pub use horizon::Horizon;
pub use lookback::Lookback;
pub use price::{PricePoint, Series};
pub use recommendation::{Action, Recommendation};
pub use signal::{
    BandLabel, IndicatorFamily, MacdLabel, RsiLabel, Signal, SignalKind, SignalSet, TrendLabel,
};
