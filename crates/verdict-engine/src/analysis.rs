//! End-to-end analysis of one series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verdict_core::error::{EngineError, VerdictResult};
use verdict_core::traits::SeriesSource;
use verdict_core::types::{EnrichedPoint, Series, SignalSet};
use verdict_indicators::IndicatorSet;

use crate::classifier::{classified_index, classify};
use crate::config::EngineConfig;
use crate::recommendation::{recommend, Verdict};

/// Result of analyzing one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub symbol: String,
    /// Evaluation date
    pub as_of: NaiveDate,
    /// Date of the latest point with a valid close
    pub latest_date: NaiveDate,
    /// Close at `latest_date`
    pub price: f64,
    /// Calendar days between the latest point and `as_of`
    pub stale_days: i64,
    pub signals: SignalSet,
    #[serde(flatten)]
    pub verdict: Verdict,
    /// Enriched series, one point per input point
    #[serde(rename = "data")]
    pub indicators: Vec<EnrichedPoint>,
}

impl Analysis {
    /// Whether the latest point is older than the given number of days.
    pub fn is_stale(&self, after_days: i64) -> bool {
        self.stale_days > after_days
    }
}

/// Runs enrichment, classification and scoring with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: EngineConfig,
    indicators: IndicatorSet,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            indicators: IndicatorSet::default(),
        }
    }
}

impl Analyzer {
    /// Create an analyzer, rejecting an invalid configuration.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            indicators: IndicatorSet::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Enrich the series without classifying it.
    pub fn enrich(&self, series: &Series) -> Vec<EnrichedPoint> {
        self.indicators.enrich(series)
    }

    /// Analyze a series as of the given date.
    pub fn analyze(&self, series: &Series, as_of: NaiveDate) -> Analysis {
        let indicators = self.indicators.enrich(series);
        let signals = classify(&indicators, &self.config);
        let verdict = recommend(&signals, &self.config);

        // Price and date come from the point the signals were read from.
        let latest = classified_index(&indicators)
            .map(|i| indicators[i].point)
            .unwrap_or(*series.last());
        if latest.date != series.last().date {
            warn!(
                symbol = series.symbol(),
                latest = %series.last().date,
                used = %latest.date,
                "trailing points have no valid close"
            );
        }

        let stale_days = (as_of - latest.date).num_days();
        if stale_days > self.config.stale_after_days {
            warn!(
                symbol = series.symbol(),
                latest = %latest.date,
                %as_of,
                stale_days,
                "latest price point is stale"
            );
        }

        debug!(
            symbol = series.symbol(),
            signals = signals.len(),
            composite = verdict.composite_score,
            "analysis complete"
        );

        Analysis {
            symbol: series.symbol().to_string(),
            as_of,
            latest_date: latest.date,
            price: latest.close,
            stale_days,
            signals,
            verdict,
            indicators,
        }
    }
}

impl Analyzer {
    /// Load a symbol from a source and analyze it.
    pub async fn analyze_from(
        &self,
        source: &dyn SeriesSource,
        symbol: &str,
        as_of: NaiveDate,
    ) -> VerdictResult<Analysis> {
        let series = source.load_series(symbol).await?;
        debug!(symbol, source = source.name(), points = series.len(), "series loaded");
        Ok(self.analyze(&series, as_of))
    }
}

/// Analyze a series with the default configuration.
pub fn analyze(series: &Series, as_of: NaiveDate) -> Analysis {
    Analyzer::default().analyze(series, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use verdict_core::error::{DataError, VerdictError};
    use verdict_core::types::{Action, Horizon, PricePoint};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn series_from(closes: impl IntoIterator<Item = f64>) -> Series {
        let points = closes
            .into_iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(start() + Duration::days(i as i64), c, c, c, c, 1_000.0))
            .collect();
        Series::new("TEST", points).unwrap()
    }

    fn label(analysis: &Analysis, family: verdict_core::types::IndicatorFamily) -> &'static str {
        analysis.signals.get(family).unwrap().kind.label()
    }

    #[test]
    fn test_rising_series_reads_bullish() {
        use verdict_core::types::IndicatorFamily;

        let series = series_from((0..60).map(|i| 100.0 + i as f64));
        let analysis = analyze(&series, start() + Duration::days(59));

        assert_eq!(analysis.signals.len(), 4);
        assert_eq!(label(&analysis, IndicatorFamily::Trend), "STRONG_UP");
        assert_eq!(label(&analysis, IndicatorFamily::Rsi), "OVERBOUGHT");
        assert!((analysis.signals.rsi.as_ref().unwrap().value.unwrap() - 100.0).abs() < 1e-9);
        assert!(label(&analysis, IndicatorFamily::Macd).starts_with("BULLISH"));

        // 0.30 - 0.25 + 0.15 lands on the BUY boundary
        assert!((analysis.verdict.composite_score - 0.2).abs() < 1e-9);
        let today = analysis.verdict.for_horizon(Horizon::Today).unwrap();
        assert_eq!(today.action, Action::Buy);
        let week = analysis.verdict.for_horizon(Horizon::Week).unwrap();
        assert_eq!(week.action, Action::Hold);
        assert_eq!(analysis.price, 159.0);
        assert_eq!(analysis.stale_days, 0);
    }

    #[test]
    fn test_flat_series_holds() {
        use verdict_core::types::IndicatorFamily;

        let series = series_from(std::iter::repeat(100.0).take(60));
        let analysis = analyze(&series, start() + Duration::days(59));

        let last = analysis.indicators.last().unwrap();
        assert_eq!(last.rsi, Some(50.0));
        assert_eq!(last.bb_upper, Some(100.0));
        assert_eq!(last.bb_middle, Some(100.0));
        assert_eq!(last.bb_lower, Some(100.0));

        assert_eq!(label(&analysis, IndicatorFamily::Trend), "SIDEWAYS");
        assert_eq!(label(&analysis, IndicatorFamily::Rsi), "NEUTRAL");
        assert_eq!(label(&analysis, IndicatorFamily::Bollinger), "MIDDLE_RANGE");
        assert_eq!(label(&analysis, IndicatorFamily::Macd), "NEUTRAL");

        for rec in &analysis.verdict.recommendations {
            assert_eq!(rec.action, Action::Hold);
            assert_eq!(rec.confidence, 0.0);
        }
    }

    #[test]
    fn test_short_series_degrades_to_hold() {
        let series = series_from([10.0, 11.0, 12.0, 11.0, 10.0]);
        let analysis = analyze(&series, start() + Duration::days(4));

        assert_eq!(analysis.indicators.len(), 5);
        assert!(analysis.indicators.iter().all(EnrichedPoint::is_bare));
        assert!(analysis.signals.is_empty());
        assert_eq!(analysis.verdict.recommendations.len(), 4);
        for rec in &analysis.verdict.recommendations {
            assert_eq!(rec.action, Action::Hold);
            assert_eq!(rec.confidence, 0.0);
        }
    }

    #[test]
    fn test_stale_days_reported() {
        let series = series_from((0..10).map(|i| 50.0 + i as f64));
        let analysis = analyze(&series, start() + Duration::days(20));

        assert_eq!(analysis.latest_date, start() + Duration::days(9));
        assert_eq!(analysis.stale_days, 11);
        assert!(analysis.is_stale(5));
    }

    #[test]
    fn test_trailing_malformed_point_reports_classified_close() {
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        closes.push(f64::NAN);
        let series = series_from(closes);
        let analysis = analyze(&series, start() + Duration::days(40));

        assert_eq!(analysis.price, 139.0);
        assert_eq!(analysis.latest_date, start() + Duration::days(39));
        assert_eq!(analysis.stale_days, 1);
        assert!(analysis.signals.rsi.is_some());
    }

    struct FixedSource(Series);

    #[async_trait::async_trait]
    impl SeriesSource for FixedSource {
        async fn load_series(&self, symbol: &str) -> Result<Series, DataError> {
            if symbol == self.0.symbol() {
                Ok(self.0.clone())
            } else {
                Err(DataError::SymbolNotFound(symbol.to_string()))
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_analyze_from_source() {
        let source = FixedSource(series_from((0..30).map(|i| 20.0 + i as f64)));
        let analyzer = Analyzer::default();

        let analysis = analyzer
            .analyze_from(&source, "TEST", start() + Duration::days(29))
            .await
            .unwrap();
        assert_eq!(analysis.symbol, "TEST");
        assert_eq!(analysis.price, 49.0);

        let missing = analyzer
            .analyze_from(&source, "NOPE", start())
            .await
            .unwrap_err();
        assert!(matches!(
            missing,
            VerdictError::Data(DataError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.thresholds.strong_buy = 0.1;
        assert!(Analyzer::new(config).is_err());
    }

    #[test]
    fn test_json_field_names() {
        let series = series_from((0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()));
        let analysis = analyze(&series, start() + Duration::days(59));
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["symbol"], "TEST");
        assert!(json["compositeScore"].is_number());
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 4);
        assert_eq!(json["data"].as_array().unwrap().len(), 60);
        assert!(json["data"][59]["SMA_50"].is_number());
        assert!(json["data"][0]["SMA_20"].is_null());
        assert!(json["signals"]["rsi"]["label"].is_string());
    }
}
