//! Price points annotated with indicator values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PricePoint;

/// A price point plus every indicator value computed for it.
///
/// A field is `Some` only once its window lies fully inside the series.
/// Serialized field names are the column names charting clients render
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPoint {
    #[serde(flatten)]
    pub point: PricePoint,
    #[serde(rename = "SMA_20")]
    pub sma_20: Option<f64>,
    #[serde(rename = "SMA_50")]
    pub sma_50: Option<f64>,
    #[serde(rename = "EMA_12")]
    pub ema_12: Option<f64>,
    #[serde(rename = "EMA_26")]
    pub ema_26: Option<f64>,
    #[serde(rename = "BB_Upper")]
    pub bb_upper: Option<f64>,
    #[serde(rename = "BB_Middle")]
    pub bb_middle: Option<f64>,
    #[serde(rename = "BB_Lower")]
    pub bb_lower: Option<f64>,
    #[serde(rename = "BB_Width")]
    pub bb_width: Option<f64>,
    #[serde(rename = "MACD")]
    pub macd: Option<f64>,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: Option<f64>,
    #[serde(rename = "MACD_Histogram")]
    pub macd_histogram: Option<f64>,
    #[serde(rename = "RSI")]
    pub rsi: Option<f64>,
}

impl EnrichedPoint {
    /// Wrap a price point with no indicator values yet.
    pub fn bare(point: PricePoint) -> Self {
        Self {
            point,
            sma_20: None,
            sma_50: None,
            ema_12: None,
            ema_26: None,
            bb_upper: None,
            bb_middle: None,
            bb_lower: None,
            bb_width: None,
            macd: None,
            macd_signal: None,
            macd_histogram: None,
            rsi: None,
        }
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.point.date
    }

    #[inline]
    pub fn close(&self) -> f64 {
        self.point.close
    }

    /// True when no indicator field is defined.
    pub fn is_bare(&self) -> bool {
        [
            self.sma_20,
            self.sma_50,
            self.ema_12,
            self.ema_26,
            self.bb_upper,
            self.bb_middle,
            self.bb_lower,
            self.bb_width,
            self.macd,
            self.macd_signal,
            self.macd_histogram,
            self.rsi,
        ]
        .iter()
        .all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_column_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut enriched = EnrichedPoint::bare(PricePoint::new(date, 1.0, 2.0, 0.5, 1.5, 10.0));
        assert!(enriched.is_bare());

        enriched.sma_20 = Some(1.25);
        assert!(!enriched.is_bare());

        let json = serde_json::to_value(enriched).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["close"], 1.5);
        assert_eq!(json["SMA_20"], 1.25);
        assert!(json["MACD_Histogram"].is_null());
        assert!(json["RSI"].is_null());
    }
}
