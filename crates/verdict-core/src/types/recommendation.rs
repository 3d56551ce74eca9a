//! Buy/sell recommendations per horizon.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Horizon;

/// Recommended action, ordered from most bearish to most bullish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    StrongSell,
    Sell,
    Hold,
    Buy,
    StrongBuy,
}

impl Action {
    /// Ordinal position: -2 (strong sell) to +2 (strong buy).
    pub fn ordinal(&self) -> i8 {
        match self {
            Action::StrongSell => -2,
            Action::Sell => -1,
            Action::Hold => 0,
            Action::Buy => 1,
            Action::StrongBuy => 2,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.ordinal() > 0
    }

    pub fn is_sell(&self) -> bool {
        self.ordinal() < 0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::StrongSell => "STRONG SELL",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
            Action::Buy => "BUY",
            Action::StrongBuy => "STRONG BUY",
        };
        write!(f, "{}", s)
    }
}

/// Recommendation for a single horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Horizon this recommendation applies to
    pub timeframe: Horizon,
    /// Recommended action
    pub action: Action,
    /// Confidence on a 0-100 scale
    pub confidence: f64,
    /// Composite score before horizon dampening, in [-1, 1]
    pub raw_score: f64,
    /// Score after the horizon multiplier, the value thresholds apply to
    pub adjusted_score: f64,
}

impl Recommendation {
    /// Neutral recommendation used when no signal is available.
    pub fn hold(timeframe: Horizon) -> Self {
        Self {
            timeframe,
            action: Action::Hold,
            confidence: 0.0,
            raw_score: 0.0,
            adjusted_score: 0.0,
        }
    }
}
