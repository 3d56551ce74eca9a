//! Daily price points and the validated series that holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Lookback;
use crate::error::SeriesError;

/// One trading session (open, high, low, close, volume).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Session date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Whether the close can feed indicator windows.
    #[inline]
    pub fn has_valid_close(&self) -> bool {
        self.close.is_finite()
    }

    /// Whether every OHLCV field is a finite number.
    pub fn is_well_formed(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Chronological price history for one symbol.
///
/// Always holds at least one point, with strictly increasing dates.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    symbol: String,
    points: Vec<PricePoint>,
}

impl Series {
    /// Build a series, validating ordering and non-emptiness.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NonChronological {
                    index: i + 1,
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    /// Symbol the series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get all points as a slice.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Get the latest point.
    pub fn last(&self) -> &PricePoint {
        // Non-empty by construction.
        &self.points[self.points.len() - 1]
    }

    /// Keep only the points inside a trailing window ending at the latest session.
    ///
    /// The latest point always survives, so the result is never empty.
    pub fn trailing(&self, lookback: Lookback) -> Series {
        let points = match lookback.start(self.last().date) {
            Some(start) => self.points.iter().filter(|p| p.date >= start).copied().collect(),
            None => self.points.clone(),
        };
        Series {
            symbol: self.symbol.clone(),
            points,
        }
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Count points with a non-finite field.
    pub fn malformed_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_well_formed()).count()
    }

    /// Get an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }
}
