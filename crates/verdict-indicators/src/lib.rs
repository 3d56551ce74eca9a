//! Technical indicators with SIMD helpers.
//!
//! This crate provides the indicator calculations behind the engine:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Bollinger Bands)
//! - [`enrich`], which annotates a whole series with every indicator
//!
//! Windowed sums and squared deviations use the `wide` crate for portable
//! SIMD.

pub mod enrich;
pub mod momentum;
pub mod moving_average;
pub mod simd;
pub mod volatility;

pub use enrich::{enrich, finite_runs, IndicatorSet};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BollingerBands, BollingerOutput};
