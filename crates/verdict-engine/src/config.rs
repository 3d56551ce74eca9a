//! Engine configuration.

use serde::{Deserialize, Serialize};
use verdict_core::error::EngineError;
use verdict_core::types::{Horizon, IndicatorFamily};

/// Tunable parameters for classification and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Family weights in the composite score
    pub weights: FamilyWeights,
    /// Score thresholds for each action
    pub thresholds: ActionThresholds,
    /// Per-horizon score multipliers
    pub horizons: HorizonMultipliers,
    /// RSI overbought/oversold levels
    pub rsi: RsiBands,
    /// SMA gap (percent of SMA_50) above which a trend counts as strong
    pub trend_strong_gap_pct: f64,
    /// Confidence per unit of adjusted score, as a fraction of 100
    pub confidence_scale: f64,
    /// Days between the latest session and `as_of` before data is flagged stale
    pub stale_after_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: FamilyWeights::default(),
            thresholds: ActionThresholds::default(),
            horizons: HorizonMultipliers::default(),
            rsi: RsiBands::default(),
            trend_strong_gap_pct: 2.0,
            confidence_scale: 1.0,
            stale_after_days: 5,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        self.horizons.validate()?;
        self.rsi.validate()?;

        if !(self.trend_strong_gap_pct >= 0.0) {
            return Err(EngineError::InvalidConfig(
                "Trend strong gap must be non-negative".into(),
            ));
        }
        if !(self.confidence_scale > 0.0) {
            return Err(EngineError::InvalidConfig(
                "Confidence scale must be positive".into(),
            ));
        }
        if self.stale_after_days < 0 {
            return Err(EngineError::InvalidConfig(
                "Stale-data horizon must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Composite score weights per indicator family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyWeights {
    pub rsi: f64,
    pub macd: f64,
    pub trend: f64,
    pub bollinger: f64,
}

impl Default for FamilyWeights {
    fn default() -> Self {
        Self {
            rsi: 0.25,
            macd: 0.30,
            trend: 0.30,
            bollinger: 0.15,
        }
    }
}

impl FamilyWeights {
    /// Configured weight for a family.
    pub fn weight(&self, family: IndicatorFamily) -> f64 {
        match family {
            IndicatorFamily::Trend => self.trend,
            IndicatorFamily::Rsi => self.rsi,
            IndicatorFamily::Macd => self.macd,
            IndicatorFamily::Bollinger => self.bollinger,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        let all = [self.rsi, self.macd, self.trend, self.bollinger];
        if all.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
            return Err(EngineError::InvalidConfig(
                "Family weights must be finite and non-negative".into(),
            ));
        }
        if all.iter().sum::<f64>() <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "At least one family weight must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Adjusted-score boundaries between actions.
///
/// `s >= strong_buy` is STRONG_BUY, `buy <= s < strong_buy` BUY,
/// `sell < s < buy` HOLD, `strong_sell < s <= sell` SELL and
/// `s <= strong_sell` STRONG_SELL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionThresholds {
    pub strong_buy: f64,
    pub buy: f64,
    pub sell: f64,
    pub strong_sell: f64,
}

impl Default for ActionThresholds {
    fn default() -> Self {
        Self {
            strong_buy: 0.6,
            buy: 0.2,
            sell: -0.2,
            strong_sell: -0.6,
        }
    }
}

impl ActionThresholds {
    fn validate(&self) -> Result<(), EngineError> {
        let ordered = self.strong_sell < self.sell
            && self.sell < self.buy
            && self.buy < self.strong_buy
            && self.sell <= 0.0
            && self.buy >= 0.0;
        if !ordered {
            return Err(EngineError::InvalidConfig(
                "Thresholds must satisfy strong_sell < sell <= 0 <= buy < strong_buy".into(),
            ));
        }
        Ok(())
    }
}

/// Score multipliers per horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonMultipliers {
    pub today: f64,
    pub week: f64,
    pub month: f64,
    pub year: f64,
}

impl Default for HorizonMultipliers {
    fn default() -> Self {
        Self {
            today: Horizon::Today.default_multiplier(),
            week: Horizon::Week.default_multiplier(),
            month: Horizon::Month.default_multiplier(),
            year: Horizon::Year.default_multiplier(),
        }
    }
}

impl HorizonMultipliers {
    /// Multiplier applied to the composite score for a horizon.
    pub fn multiplier(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::Today => self.today,
            Horizon::Week => self.week,
            Horizon::Month => self.month,
            Horizon::Year => self.year,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        let all = [self.today, self.week, self.month, self.year];
        if all.iter().any(|m| !(*m > 0.0 && *m <= 1.0)) {
            return Err(EngineError::InvalidConfig(
                "Horizon multipliers must be in (0, 1]".into(),
            ));
        }
        if !all.windows(2).all(|w| w[1] <= w[0]) {
            return Err(EngineError::InvalidConfig(
                "Horizon multipliers must not grow with the horizon".into(),
            ));
        }
        Ok(())
    }
}

/// RSI zone boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiBands {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiBands {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl RsiBands {
    fn validate(&self) -> Result<(), EngineError> {
        if self.overbought <= self.oversold {
            return Err(EngineError::InvalidConfig(
                "Overbought must be greater than oversold".into(),
            ));
        }
        if self.overbought > 100.0 || self.oversold < 0.0 {
            return Err(EngineError::InvalidConfig(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());

        let total: f64 = IndicatorFamily::all()
            .iter()
            .map(|f| config.weights.weight(*f))
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(config.horizons.multiplier(Horizon::Year), 0.6);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = EngineConfig::default();
        config.weights.macd = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let mut config = EngineConfig::default();
        config.weights = FamilyWeights {
            rsi: 0.0,
            macd: 0.0,
            trend: 0.0,
            bollinger: 0.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let mut config = EngineConfig::default();
        config.thresholds.buy = 0.7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_growing_multipliers() {
        let mut config = EngineConfig::default();
        config.horizons.year = 0.95;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_rsi_bands() {
        let mut config = EngineConfig::default();
        config.rsi = RsiBands {
            overbought: 30.0,
            oversold: 70.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"weights": {"rsi": 0.5}, "confidence_scale": 0.8}"#).unwrap();

        assert_eq!(config.weights.rsi, 0.5);
        assert_eq!(config.weights.macd, 0.30);
        assert_eq!(config.confidence_scale, 0.8);
        assert_eq!(config.thresholds, ActionThresholds::default());
    }
}
