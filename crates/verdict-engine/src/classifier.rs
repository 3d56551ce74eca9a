//! Signal classification from the latest enriched points.

use std::cmp::Ordering;

use verdict_core::types::{
    BandLabel, EnrichedPoint, MacdLabel, RsiLabel, Signal, SignalKind, SignalSet, TrendLabel,
};

use crate::config::EngineConfig;

/// Magnitude below which an oscillator reading counts as flat.
///
/// Scaled to the price level so EMA round-off over constant input
/// (on the order of 1e-14 * price) never reads as a direction.
pub fn flat_tolerance(close: f64) -> f64 {
    1e-9 * close.abs().max(1.0)
}

/// Index of the point signals are read from: the latest one with a finite close.
pub fn classified_index(points: &[EnrichedPoint]) -> Option<usize> {
    points.iter().rposition(|p| p.close().is_finite())
}

/// Classify every indicator family at the latest point with a finite close.
///
/// A family whose inputs are undefined at that point is left out.
pub fn classify(points: &[EnrichedPoint], config: &EngineConfig) -> SignalSet {
    let Some(end) = classified_index(points) else {
        return SignalSet::default();
    };
    let latest = &points[end];
    let previous = end.checked_sub(1).map(|i| &points[i]);

    SignalSet {
        trend: classify_trend(latest, previous, config),
        rsi: classify_rsi(latest, config),
        macd: classify_macd(latest, previous),
        bollinger: classify_bollinger(latest),
    }
}

fn classify_trend(
    latest: &EnrichedPoint,
    previous: Option<&EnrichedPoint>,
    config: &EngineConfig,
) -> Option<Signal> {
    let short = latest.sma_20?;
    let long = latest.sma_50?;
    let prev = previous?;
    let prev_short = prev.sma_20?;
    let prev_long = prev.sma_50?;

    let gap_pct = if long != 0.0 {
        (short - long) / long * 100.0
    } else {
        0.0
    };
    let strong = gap_pct.abs() > config.trend_strong_gap_pct;

    let rising = short > prev_short && long > prev_long;
    let falling = short < prev_short && long < prev_long;

    let label = if short > long && rising {
        if strong {
            TrendLabel::StrongUp
        } else {
            TrendLabel::Up
        }
    } else if short < long && falling {
        if strong {
            TrendLabel::StrongDown
        } else {
            TrendLabel::Down
        }
    } else {
        TrendLabel::Sideways
    };

    let close = latest.close();
    let description = match label {
        TrendLabel::StrongUp => format!(
            "SMA20 {:.2} is {:.1}% above SMA50 {:.2}, both rising - strong uptrend (close {:.2})",
            short, gap_pct, long, close
        ),
        TrendLabel::Up => format!(
            "SMA20 {:.2} above SMA50 {:.2}, both rising - uptrend (close {:.2})",
            short, long, close
        ),
        TrendLabel::Sideways => format!(
            "SMA20 {:.2} and SMA50 {:.2} not moving together - no clear trend (close {:.2})",
            short, long, close
        ),
        TrendLabel::Down => format!(
            "SMA20 {:.2} below SMA50 {:.2}, both falling - downtrend (close {:.2})",
            short, long, close
        ),
        TrendLabel::StrongDown => format!(
            "SMA20 {:.2} is {:.1}% below SMA50 {:.2}, both falling - strong downtrend (close {:.2})",
            short,
            gap_pct.abs(),
            long,
            close
        ),
    };

    Some(Signal {
        kind: SignalKind::Trend(label),
        value: Some(gap_pct),
        description,
    })
}

fn classify_rsi(latest: &EnrichedPoint, config: &EngineConfig) -> Option<Signal> {
    let rsi = latest.rsi?;

    let (label, description) = if rsi > config.rsi.overbought {
        (
            RsiLabel::Overbought,
            format!("RSI at {:.1} - overbought, possible pullback", rsi),
        )
    } else if rsi < config.rsi.oversold {
        (
            RsiLabel::Oversold,
            format!("RSI at {:.1} - oversold, possible rebound", rsi),
        )
    } else {
        (
            RsiLabel::Neutral,
            format!("RSI at {:.1} - within normal range", rsi),
        )
    };

    Some(Signal {
        kind: SignalKind::Rsi(label),
        value: Some(rsi),
        description,
    })
}

/// Sign of a value, with anything inside the tolerance treated as zero.
fn sign_within(value: f64, tolerance: f64) -> Ordering {
    if value > tolerance {
        Ordering::Greater
    } else if value < -tolerance {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

fn classify_macd(latest: &EnrichedPoint, previous: Option<&EnrichedPoint>) -> Option<Signal> {
    let macd = latest.macd?;
    let signal = latest.macd_signal?;
    let histogram = latest.macd_histogram?;

    let tolerance = flat_tolerance(latest.close());
    let current = sign_within(histogram, tolerance);
    let prior = previous
        .and_then(|p| p.macd_histogram)
        .map(|h| sign_within(h, tolerance));

    let label = match (prior, current) {
        (Some(p), Ordering::Greater) if p != Ordering::Greater => MacdLabel::BullishCrossover,
        (Some(p), Ordering::Less) if p != Ordering::Less => MacdLabel::BearishCrossover,
        (_, Ordering::Greater) => MacdLabel::Bullish,
        (_, Ordering::Less) => MacdLabel::Bearish,
        // Histogram flat: fall back to the side of zero the MACD line is on.
        (_, Ordering::Equal) => match sign_within(macd, tolerance) {
            Ordering::Greater => MacdLabel::Bullish,
            Ordering::Less => MacdLabel::Bearish,
            Ordering::Equal => MacdLabel::Neutral,
        },
    };

    let description = match label {
        MacdLabel::BullishCrossover => format!(
            "MACD {:.3} crossed above signal line {:.3}",
            macd, signal
        ),
        MacdLabel::BearishCrossover => format!(
            "MACD {:.3} crossed below signal line {:.3}",
            macd, signal
        ),
        MacdLabel::Bullish if current == Ordering::Equal => format!(
            "MACD {:.3} above zero, tracking its signal line",
            macd
        ),
        MacdLabel::Bearish if current == Ordering::Equal => format!(
            "MACD {:.3} below zero, tracking its signal line",
            macd
        ),
        MacdLabel::Bullish => format!("MACD {:.3} above signal line {:.3}", macd, signal),
        MacdLabel::Bearish => format!("MACD {:.3} below signal line {:.3}", macd, signal),
        MacdLabel::Neutral => "MACD flat at zero - no momentum".to_string(),
    };

    Some(Signal {
        kind: SignalKind::Macd(label),
        value: Some(macd),
        description,
    })
}

fn classify_bollinger(latest: &EnrichedPoint) -> Option<Signal> {
    let upper = latest.bb_upper?;
    let lower = latest.bb_lower?;
    let close = latest.close();

    // Collapsed bands carry no information about extremes.
    let collapsed = upper == lower;
    let percent_b = if collapsed {
        0.5
    } else {
        (close - lower) / (upper - lower)
    };

    let (label, description) = if collapsed {
        (
            BandLabel::MiddleRange,
            format!("Bands collapsed at {:.2} - no volatility", upper),
        )
    } else if close >= upper {
        (
            BandLabel::NearUpper,
            format!(
                "Close {:.2} at/above upper band {:.2} - potential resistance",
                close, upper
            ),
        )
    } else if close <= lower {
        (
            BandLabel::NearLower,
            format!(
                "Close {:.2} at/below lower band {:.2} - potential support",
                close, lower
            ),
        )
    } else {
        (
            BandLabel::MiddleRange,
            format!(
                "Close {:.2} within bands, {:.0}% of the way from lower to upper",
                close,
                percent_b * 100.0
            ),
        )
    };

    Some(Signal {
        kind: SignalKind::Bollinger(label),
        value: Some(percent_b),
        description,
    })
}
