//! Indicator trait definitions.

/// Trait for technical indicators over a single input column.
///
/// Outputs are compact: the first output value aligns with input index
/// `period() - 1`, and there is exactly one output per input point after
/// that. Inputs shorter than `period()` produce no output.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closes)
    ///
    /// # Returns
    /// A vector of indicator values
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required for the first output.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate and align outputs with the input, `None` during warm-up.
    fn calculate_aligned(&self, data: &[f64]) -> Vec<Option<Self::Output>> {
        let lead = self.period().saturating_sub(1).min(data.len());
        let mut result: Vec<Option<Self::Output>> = Vec::with_capacity(data.len());
        result.extend((0..lead).map(|_| None));
        result.extend(self.calculate(data).into_iter().map(Some));
        result
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Same alignment contract as [`Indicator`].
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required for the first output.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate and align outputs with the input, `None` during warm-up.
    fn calculate_aligned(&self, data: &[f64]) -> Vec<Option<Self::Outputs>> {
        let lead = self.period().saturating_sub(1).min(data.len());
        let mut result: Vec<Option<Self::Outputs>> = Vec::with_capacity(data.len());
        result.extend((0..lead).map(|_| None));
        result.extend(self.calculate(data).into_iter().map(Some));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            if data.len() < self.period {
                return vec![];
            }
            // Simple sum indicator for testing
            data.windows(self.period)
                .map(|w| w.iter().sum())
                .collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_indicator_calculate() {
        let indicator = TestIndicator { period: 3 };
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = indicator.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 6.0).abs() < 0.001); // 1+2+3
        assert!((result[1] - 9.0).abs() < 0.001); // 2+3+4
        assert!((result[2] - 12.0).abs() < 0.001); // 3+4+5
    }

    #[test]
    fn test_calculate_aligned() {
        let indicator = TestIndicator { period: 3 };
        let aligned = indicator.calculate_aligned(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(aligned, vec![None, None, Some(6.0), Some(9.0)]);
    }

    #[test]
    fn test_calculate_aligned_short_input() {
        let indicator = TestIndicator { period: 5 };
        let aligned = indicator.calculate_aligned(&[1.0, 2.0]);

        assert_eq!(aligned, vec![None, None]);
    }
}
