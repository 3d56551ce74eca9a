//! Recommendation horizons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Holding horizon a recommendation is issued for.
///
/// Longer horizons dampen the composite score, since daily indicators
/// carry less conviction over longer holding periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    /// Next session
    Today,
    /// About five sessions
    Week,
    /// About a month of sessions
    Month,
    /// About a year of sessions
    Year,
}

impl Horizon {
    /// Default score multiplier for this horizon.
    pub fn default_multiplier(&self) -> f64 {
        match self {
            Horizon::Today => 1.0,
            Horizon::Week => 0.9,
            Horizon::Month => 0.8,
            Horizon::Year => 0.6,
        }
    }

    /// Get all horizons, shortest first.
    pub fn all() -> &'static [Horizon] {
        &[Horizon::Today, Horizon::Week, Horizon::Month, Horizon::Year]
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Horizon::Today => "today",
            Horizon::Week => "week",
            Horizon::Month => "month",
            Horizon::Year => "year",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Horizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "day" | "1d" => Ok(Horizon::Today),
            "week" | "1w" => Ok(Horizon::Week),
            "month" | "1mo" => Ok(Horizon::Month),
            "year" | "1y" => Ok(Horizon::Year),
            _ => Err(format!("Invalid horizon: {}", s)),
        }
    }
}
