//! Series source trait definitions.

use crate::error::DataError;
use crate::types::Series;
use async_trait::async_trait;

/// Trait for providers of daily price history.
///
/// Implementations deliver validated series: chronologically ordered,
/// no duplicate dates, at least one point.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Load the full daily history for a symbol.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to load
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    async fn load_series(&self, symbol: &str) -> Result<Series, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
