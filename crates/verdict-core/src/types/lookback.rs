//! How much trailing history to analyze.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing window of history, counted back from the latest session.
///
/// Parsed from the usual provider period strings: `5d`, `1mo`, `6mo`, `1y`,
/// `ytd`, `max`. Day counts are calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lookback {
    Days(u32),
    Months(u32),
    Years(u32),
    YearToDate,
    Max,
}

impl Lookback {
    /// Earliest date kept when the latest session is `latest`, or `None` for all history.
    pub fn start(&self, latest: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Lookback::Days(n) => latest.checked_sub_signed(Duration::days(i64::from(n))),
            Lookback::Months(n) => latest.checked_sub_months(Months::new(n)),
            Lookback::Years(n) => latest.checked_sub_months(Months::new(n.saturating_mul(12))),
            Lookback::YearToDate => NaiveDate::from_ymd_opt(latest.year(), 1, 1),
            Lookback::Max => None,
        }
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Lookback::Max
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookback::Days(n) => write!(f, "{}d", n),
            Lookback::Months(n) => write!(f, "{}mo", n),
            Lookback::Years(n) => write!(f, "{}y", n),
            Lookback::YearToDate => write!(f, "ytd"),
            Lookback::Max => write!(f, "max"),
        }
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "max" => return Ok(Lookback::Max),
            "ytd" => return Ok(Lookback::YearToDate),
            _ => {}
        }

        let split = lower
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("Invalid period: {}", s))?;
        let (count, unit) = lower.split_at(split);
        let count: u32 = count
            .parse()
            .map_err(|_| format!("Invalid period: {}", s))?;
        if count == 0 {
            return Err(format!("Period must be positive: {}", s));
        }

        match unit {
            "d" => Ok(Lookback::Days(count)),
            "mo" => Ok(Lookback::Months(count)),
            "y" => Ok(Lookback::Years(count)),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

impl TryFrom<String> for Lookback {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Lookback> for String {
    fn from(lookback: Lookback) -> Self {
        lookback.to_string()
    }
}
