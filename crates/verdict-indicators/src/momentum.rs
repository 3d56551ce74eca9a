//! Momentum indicators.

use serde::{Deserialize, Serialize};
use verdict_core::traits::{Indicator, MultiOutputIndicator};

use crate::moving_average::Ema;
use crate::simd::{gains_losses_simd, sum_simd};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate using Wilder's smoothing method.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let period_f64 = period as f64;

        // Initial average
        let mut avg = sum_simd(&values[..period]) / period_f64;
        result.push(avg);

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }

    /// RSI from smoothed averages.
    ///
    /// No movement at all reads as the midpoint rather than a maximum.
    #[inline]
    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain > 0.0 {
                100.0
            } else {
                50.0
            }
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let (gains, losses) = gains_losses_simd(data);

        // Smooth gains and losses
        let avg_gains = Self::wilder_smooth(&gains, self.period);
        let avg_losses = Self::wilder_smooth(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| Self::from_averages(gain, loss))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
///
/// The MACD line is available as soon as the slow EMA is seeded; the signal
/// line and histogram need a further `signal_period - 1` points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: Option<f64>,
    /// Histogram (MACD - Signal)
    pub histogram: Option<f64>,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }

    /// Points needed before the signal line is defined.
    pub fn signal_warmup(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.len() < self.slow_period {
            return vec![];
        }

        let fast_ema = Ema::new(self.fast_period).calculate(data);
        let slow_ema = Ema::new(self.slow_period).calculate(data);

        // Align the EMAs (fast has more values)
        let offset = self.slow_period - self.fast_period;
        let macd_line: Vec<f64> = fast_ema[offset..]
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        // Signal line (EMA of MACD), empty while the MACD line is too short
        let signal_line = Ema::new(self.signal_period).calculate(&macd_line);
        let lead = self.signal_period - 1;

        macd_line
            .iter()
            .enumerate()
            .map(|(i, &macd)| {
                let signal = i.checked_sub(lead).and_then(|j| signal_line.get(j).copied());
                MacdOutput {
                    macd,
                    signal,
                    histogram: signal.map(|s| macd - s),
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow_period
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Generate test data with alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 16);

        // All RSI values should be between 0 and 100
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        // All gains = RSI should be 100
        assert!((result[0] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        // All losses = RSI should be 0
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_is_midpoint() {
        let rsi = Rsi::new(14);
        let data = vec![100.0; 30];
        let result = rsi.calculate(&data);

        assert!(result.iter().all(|v| (*v - 50.0).abs() < 1e-12));
    }

    #[test]
    fn test_rsi_undefined_for_first_period_points() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..20).map(|i| 100.0 + (i % 3) as f64).collect();
        let aligned = rsi.calculate_aligned(&data);

        assert!(aligned[..14].iter().all(Option::is_none));
        assert!(aligned[14..].iter().all(Option::is_some));
    }

    #[test]
    fn test_rsi_wilder_recurrence() {
        let rsi = Rsi::new(2);
        // Changes: +2, -1, +3
        let data = vec![10.0, 12.0, 11.0, 14.0];
        let result = rsi.calculate(&data);

        // Seed: gain (2+0)/2 = 1, loss (0+1)/2 = 0.5 -> RS 2
        assert!((result[0] - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
        // Next: gain (1*1+3)/2 = 2, loss (0.5*1+0)/2 = 0.25 -> RS 8
        assert!((result[1] - (100.0 - 100.0 / 9.0)).abs() < 1e-10);
    }

    #[test]
    fn test_macd_basic() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), 25);
        // In an uptrend, MACD should be positive
        assert!(result.last().unwrap().macd > 0.0);
    }

    #[test]
    fn test_macd_signal_warmup() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0)
            .collect();
        let aligned = macd.calculate_aligned(&data);

        assert!(aligned[..25].iter().all(Option::is_none));
        for (i, output) in aligned.iter().enumerate().skip(25) {
            let output = output.unwrap();
            assert_eq!(output.signal.is_some(), i + 1 >= macd.signal_warmup());
            if let (Some(signal), Some(histogram)) = (output.signal, output.histogram) {
                assert_eq!(histogram, output.macd - signal);
            }
        }
    }

    #[test]
    fn test_macd_custom_periods() {
        let macd = Macd::with_periods(5, 10, 3);
        let data: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), 21);
        assert!(result.last().unwrap().histogram.is_some());
    }

    #[test]
    fn test_macd_linear_ramp_is_constant() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let last = *macd.calculate(&data).last().unwrap();

        // Lags of 12.5 and 5.5 on a unit ramp.
        assert!((last.macd - 7.0).abs() < 1e-9);
        assert!(last.histogram.unwrap().abs() < 1e-9);
    }
}
