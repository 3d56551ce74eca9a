//! Series enrichment: every indicator column for every point.

use std::ops::Range;

use tracing::{debug, warn};
use verdict_core::traits::{Indicator, MultiOutputIndicator};
use verdict_core::types::{EnrichedPoint, Series};

use crate::momentum::{Macd, Rsi};
use crate::moving_average::{Ema, Sma};
use crate::volatility::BollingerBands;

/// The indicator parameters used to enrich a series.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub sma_short: Sma,
    pub sma_long: Sma,
    pub ema_fast: Ema,
    pub ema_slow: Ema,
    pub bollinger: BollingerBands,
    pub macd: Macd,
    pub rsi: Rsi,
}

impl Default for IndicatorSet {
    /// SMA 20/50, EMA 12/26, Bollinger 20/2, MACD 12/26/9, RSI 14.
    fn default() -> Self {
        Self {
            sma_short: Sma::new(20),
            sma_long: Sma::new(50),
            ema_fast: Ema::new(12),
            ema_slow: Ema::new(26),
            bollinger: BollingerBands::new(),
            macd: Macd::new(),
            rsi: Rsi::new(14),
        }
    }
}

impl IndicatorSet {
    /// Produce one enriched point per input point, aligned by index.
    ///
    /// A non-finite close splits the series: no window may span it, and
    /// the recursive indicators (EMA, MACD, RSI) seed again after it.
    pub fn enrich(&self, series: &Series) -> Vec<EnrichedPoint> {
        let closes = series.closes();
        let mut enriched: Vec<EnrichedPoint> =
            series.iter().copied().map(EnrichedPoint::bare).collect();

        let runs = finite_runs(&closes);
        if runs.len() != 1 || runs[0].len() != closes.len() {
            let skipped = closes.iter().filter(|c| !c.is_finite()).count();
            warn!(
                symbol = series.symbol(),
                skipped,
                segments = runs.len(),
                "non-finite closes split the series; indicator windows restart"
            );
        }

        for run in runs {
            self.fill(&closes[run.clone()], &mut enriched[run]);
        }

        debug!(
            symbol = series.symbol(),
            points = enriched.len(),
            "series enriched"
        );

        enriched
    }

    fn fill(&self, closes: &[f64], out: &mut [EnrichedPoint]) {
        let sma_short = self.sma_short.calculate_aligned(closes);
        let sma_long = self.sma_long.calculate_aligned(closes);
        let ema_fast = self.ema_fast.calculate_aligned(closes);
        let ema_slow = self.ema_slow.calculate_aligned(closes);
        let bands = self.bollinger.calculate_aligned(closes);
        let macd = self.macd.calculate_aligned(closes);
        let rsi = self.rsi.calculate_aligned(closes);

        for (i, point) in out.iter_mut().enumerate() {
            point.sma_20 = sma_short[i];
            point.sma_50 = sma_long[i];
            point.ema_12 = ema_fast[i];
            point.ema_26 = ema_slow[i];

            if let Some(band) = bands[i] {
                point.bb_upper = Some(band.upper);
                point.bb_middle = Some(band.middle);
                point.bb_lower = Some(band.lower);
                point.bb_width = Some(band.bandwidth);
            }

            if let Some(m) = macd[i] {
                point.macd = Some(m.macd);
                point.macd_signal = m.signal;
                point.macd_histogram = m.histogram;
            }

            point.rsi = rsi[i];
        }
    }
}

/// Enrich a series with the default indicator parameters.
pub fn enrich(series: &Series) -> Vec<EnrichedPoint> {
    IndicatorSet::default().enrich(series)
}

/// Maximal index ranges of consecutive finite values.
pub fn finite_runs(values: &[f64]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, value) in values.iter().enumerate() {
        match (value.is_finite(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        runs.push(s..values.len());
    }

    runs
}
