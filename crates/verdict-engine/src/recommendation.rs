//! Composite scoring and per-horizon recommendations.

use serde::{Deserialize, Serialize};
use tracing::debug;
use verdict_core::types::{
    Action, BandLabel, Horizon, IndicatorFamily, MacdLabel, Recommendation, RsiLabel, SignalKind,
    SignalSet, TrendLabel,
};

use crate::config::{ActionThresholds, EngineConfig, FamilyWeights};

/// Slack on threshold comparisons so scores that land on a boundary
/// through float arithmetic (0.1 + 0.1 and friends) get the intended action.
const SCORE_TOLERANCE: f64 = 1e-9;

/// Directional score of a label in [-1, 1]; positive is bullish.
pub fn label_score(kind: &SignalKind) -> f64 {
    match kind {
        SignalKind::Trend(label) => match label {
            TrendLabel::StrongUp => 1.0,
            TrendLabel::Up => 0.5,
            TrendLabel::Sideways => 0.0,
            TrendLabel::Down => -0.5,
            TrendLabel::StrongDown => -1.0,
        },
        SignalKind::Rsi(label) => match label {
            RsiLabel::Oversold => 1.0,
            RsiLabel::Neutral => 0.0,
            RsiLabel::Overbought => -1.0,
        },
        SignalKind::Macd(label) => match label {
            MacdLabel::BullishCrossover => 1.0,
            MacdLabel::Bullish => 0.5,
            MacdLabel::Neutral => 0.0,
            MacdLabel::Bearish => -0.5,
            MacdLabel::BearishCrossover => -1.0,
        },
        SignalKind::Bollinger(label) => match label {
            BandLabel::NearLower => 1.0,
            BandLabel::MiddleRange => 0.0,
            BandLabel::NearUpper => -1.0,
        },
    }
}

/// Weights of the present families, renormalized to sum to 1.
///
/// Empty when no family is present or the present families carry no weight.
pub fn effective_weights(
    signals: &SignalSet,
    weights: &FamilyWeights,
) -> Vec<(IndicatorFamily, f64)> {
    let present: Vec<(IndicatorFamily, f64)> = signals
        .iter()
        .map(|s| (s.family(), weights.weight(s.family())))
        .collect();

    let total: f64 = present.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    present
        .into_iter()
        .map(|(family, w)| (family, w / total))
        .collect()
}

/// Weighted composite score in [-1, 1], or `None` with no usable signal.
pub fn composite_score(signals: &SignalSet, weights: &FamilyWeights) -> Option<f64> {
    let effective = effective_weights(signals, weights);
    if effective.is_empty() {
        return None;
    }

    let score: f64 = effective
        .iter()
        .filter_map(|(family, w)| signals.get(*family).map(|s| w * label_score(&s.kind)))
        .sum();

    Some(score.clamp(-1.0, 1.0))
}

/// Map an adjusted score onto an action.
pub fn action_for(score: f64, thresholds: &ActionThresholds) -> Action {
    if score >= thresholds.strong_buy - SCORE_TOLERANCE {
        Action::StrongBuy
    } else if score >= thresholds.buy - SCORE_TOLERANCE {
        Action::Buy
    } else if score <= thresholds.strong_sell + SCORE_TOLERANCE {
        Action::StrongSell
    } else if score <= thresholds.sell + SCORE_TOLERANCE {
        Action::Sell
    } else {
        Action::Hold
    }
}

/// Confidence on a 0-100 scale for an adjusted score.
pub fn confidence_for(score: f64, scale: f64) -> f64 {
    (score.abs() * 100.0 * scale).min(100.0)
}

/// Contribution of one family to the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyScore {
    pub family: IndicatorFamily,
    pub label: String,
    /// Directional score of the label
    pub score: f64,
    /// Renormalized weight
    pub weight: f64,
}

impl FamilyScore {
    /// Weighted contribution to the composite.
    pub fn contribution(&self) -> f64 {
        self.score * self.weight
    }
}

/// Composite score, its breakdown and the recommendation for every horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub composite_score: f64,
    pub scores: Vec<FamilyScore>,
    pub recommendations: Vec<Recommendation>,
}

impl Verdict {
    /// Recommendation for a horizon.
    pub fn for_horizon(&self, horizon: Horizon) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.timeframe == horizon)
    }
}

/// Score a signal set and produce one recommendation per horizon.
pub fn recommend(signals: &SignalSet, config: &EngineConfig) -> Verdict {
    let Some(composite) = composite_score(signals, &config.weights) else {
        debug!("no usable signals, every horizon holds");
        return Verdict {
            composite_score: 0.0,
            scores: Vec::new(),
            recommendations: Horizon::all().iter().map(|h| Recommendation::hold(*h)).collect(),
        };
    };

    let scores = effective_weights(signals, &config.weights)
        .into_iter()
        .filter_map(|(family, weight)| {
            signals.get(family).map(|s| FamilyScore {
                family,
                label: s.kind.label().to_string(),
                score: label_score(&s.kind),
                weight,
            })
        })
        .collect();

    let recommendations = Horizon::all()
        .iter()
        .map(|&horizon| {
            let adjusted = composite * config.horizons.multiplier(horizon);
            Recommendation {
                timeframe: horizon,
                action: action_for(adjusted, &config.thresholds),
                confidence: confidence_for(adjusted, config.confidence_scale),
                raw_score: composite,
                adjusted_score: adjusted,
            }
        })
        .collect();

    debug!(composite, families = signals.len(), "signals scored");

    Verdict {
        composite_score: composite,
        scores,
        recommendations,
    }
}
