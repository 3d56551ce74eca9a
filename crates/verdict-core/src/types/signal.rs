//! Per-family indicator signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator family a signal is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorFamily {
    /// SMA_20 vs SMA_50 trend
    Trend,
    /// Relative Strength Index
    Rsi,
    /// MACD vs its signal line
    Macd,
    /// Close vs Bollinger Bands
    Bollinger,
}

impl IndicatorFamily {
    /// Get all families in report order.
    pub fn all() -> &'static [IndicatorFamily] {
        &[
            IndicatorFamily::Trend,
            IndicatorFamily::Rsi,
            IndicatorFamily::Macd,
            IndicatorFamily::Bollinger,
        ]
    }
}

impl fmt::Display for IndicatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndicatorFamily::Trend => "trend",
            IndicatorFamily::Rsi => "rsi",
            IndicatorFamily::Macd => "macd",
            IndicatorFamily::Bollinger => "bollinger",
        };
        write!(f, "{}", s)
    }
}

/// Trend labels, strongest bullish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendLabel {
    StrongUp,
    Up,
    Sideways,
    Down,
    StrongDown,
}

/// RSI zone labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsiLabel {
    Overbought,
    Neutral,
    Oversold,
}

/// MACD labels.
///
/// `Neutral` only appears when both the MACD line and the histogram are
/// flat, e.g. over a constant price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MacdLabel {
    BullishCrossover,
    Bullish,
    Neutral,
    Bearish,
    BearishCrossover,
}

/// Close position relative to the Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandLabel {
    NearUpper,
    MiddleRange,
    NearLower,
}

/// Family plus its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "label", rename_all = "lowercase")]
pub enum SignalKind {
    Trend(TrendLabel),
    Rsi(RsiLabel),
    Macd(MacdLabel),
    Bollinger(BandLabel),
}

impl SignalKind {
    /// Family this label belongs to.
    pub fn family(&self) -> IndicatorFamily {
        match self {
            SignalKind::Trend(_) => IndicatorFamily::Trend,
            SignalKind::Rsi(_) => IndicatorFamily::Rsi,
            SignalKind::Macd(_) => IndicatorFamily::Macd,
            SignalKind::Bollinger(_) => IndicatorFamily::Bollinger,
        }
    }

    /// Wire name of the label.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Trend(TrendLabel::StrongUp) => "STRONG_UP",
            SignalKind::Trend(TrendLabel::Up) => "UP",
            SignalKind::Trend(TrendLabel::Sideways) => "SIDEWAYS",
            SignalKind::Trend(TrendLabel::Down) => "DOWN",
            SignalKind::Trend(TrendLabel::StrongDown) => "STRONG_DOWN",
            SignalKind::Rsi(RsiLabel::Overbought) => "OVERBOUGHT",
            SignalKind::Rsi(RsiLabel::Neutral) => "NEUTRAL",
            SignalKind::Rsi(RsiLabel::Oversold) => "OVERSOLD",
            SignalKind::Macd(MacdLabel::BullishCrossover) => "BULLISH_CROSSOVER",
            SignalKind::Macd(MacdLabel::Bullish) => "BULLISH",
            SignalKind::Macd(MacdLabel::Neutral) => "NEUTRAL",
            SignalKind::Macd(MacdLabel::Bearish) => "BEARISH",
            SignalKind::Macd(MacdLabel::BearishCrossover) => "BEARISH_CROSSOVER",
            SignalKind::Bollinger(BandLabel::NearUpper) => "NEAR_UPPER",
            SignalKind::Bollinger(BandLabel::MiddleRange) => "MIDDLE_RANGE",
            SignalKind::Bollinger(BandLabel::NearLower) => "NEAR_LOWER",
        }
    }
}

/// A classified indicator reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(flatten)]
    pub kind: SignalKind,
    /// Numeric snapshot the label was derived from
    pub value: Option<f64>,
    /// Human-readable explanation
    pub description: String,
}

impl Signal {
    pub fn family(&self) -> IndicatorFamily {
        self.kind.family()
    }
}

/// One optional signal per family.
///
/// A family is absent when its indicator is undefined at the latest point;
/// consumers must handle any subset being present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trend: Option<Signal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rsi: Option<Signal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub macd: Option<Signal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bollinger: Option<Signal>,
}

impl SignalSet {
    /// Get the signal for a family, if present.
    pub fn get(&self, family: IndicatorFamily) -> Option<&Signal> {
        match family {
            IndicatorFamily::Trend => self.trend.as_ref(),
            IndicatorFamily::Rsi => self.rsi.as_ref(),
            IndicatorFamily::Macd => self.macd.as_ref(),
            IndicatorFamily::Bollinger => self.bollinger.as_ref(),
        }
    }

    /// Iterate over present signals in family order.
    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        IndicatorFamily::all().iter().filter_map(|f| self.get(*f))
    }

    /// Number of families present.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
