//! Volatility indicators.

use serde::{Deserialize, Serialize};
use verdict_core::traits::{Indicator, MultiOutputIndicator};

use crate::moving_average::Sma;
use crate::simd::population_std_dev;

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Band width as a percentage of the middle band: (upper - lower) / middle * 100
    pub bandwidth: f64,
}

impl BollingerOutput {
    /// Bands with zero width, i.e. no dispersion in the window.
    pub fn is_collapsed(&self) -> bool {
        self.upper == self.lower
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of population standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        // Same SMA as the moving-average column, so the middle band matches it exactly.
        let means = Sma::new(self.period).calculate(data);

        means
            .iter()
            .zip(data.windows(self.period))
            .map(|(&mean, window)| {
                let std_dev = population_std_dev(window, mean);
                let upper = mean + self.std_dev_multiplier * std_dev;
                let lower = mean - self.std_dev_multiplier * std_dev;

                let bandwidth = if mean != 0.0 {
                    (upper - lower) / mean * 100.0
                } else {
                    0.0
                };

                BollingerOutput {
                    upper,
                    middle: mean,
                    lower,
                    bandwidth,
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
