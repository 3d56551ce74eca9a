//! SIMD building blocks for the indicators.
//!
//! These use the `wide` crate for portable SIMD operations. Each helper has
//! a scalar tail loop so any slice length is accepted.

use wide::f64x4;

/// SIMD-optimized sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        simd_sum += values;
    }

    let mut result = simd_sum.reduce_add();

    // Handle remaining elements
    for &value in &data[(chunks * 4)..] {
        result += value;
    }

    result
}

/// Sum of squared deviations from `mean`.
pub fn sum_sq_dev_simd(window: &[f64], mean: f64) -> f64 {
    let chunks = window.len() / 4;
    let mean_vec = f64x4::splat(mean);
    let mut sum_sq = 0.0;

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([
            window[idx],
            window[idx + 1],
            window[idx + 2],
            window[idx + 3],
        ]);
        let diff = values - mean_vec;
        sum_sq += (diff * diff).reduce_add();
    }

    for &value in &window[(chunks * 4)..] {
        let diff = value - mean;
        sum_sq += diff * diff;
    }

    sum_sq
}

/// Population standard deviation of a window around a known mean.
#[inline]
pub fn population_std_dev(window: &[f64], mean: f64) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    (sum_sq_dev_simd(window, mean) / window.len() as f64).sqrt()
}

/// Split period-over-period changes into gains and losses.
///
/// Both vectors have `data.len() - 1` entries; a gain is the positive part
/// of the change, a loss the magnitude of the negative part.
pub fn gains_losses_simd(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if data.len() < 2 {
        return (vec![], vec![]);
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);

    let chunks = (data.len() - 1) / 4;
    let zero = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let prev = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        let curr = f64x4::new([
            data[idx + 1],
            data[idx + 2],
            data[idx + 3],
            data[idx + 4],
        ]);

        let diff = curr - prev;
        gains.extend(diff.max(zero).to_array());
        losses.extend((zero - diff).max(zero).to_array());
    }

    // Handle remaining elements
    for i in (chunks * 4)..(data.len() - 1) {
        let change = data[i + 1] - data[i];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    (gains, losses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_simd() {
        let data: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let result = sum_simd(&data);

        // Sum of 1 to 100 = 5050
        assert!((result - 5050.0).abs() < 1e-10);
    }

    #[test]
    fn test_population_std_dev() {
        let data = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mean = sum_simd(&data) / data.len() as f64;

        // Population std dev of [2,4,4,4,5,5,7,9] = 2.0
        assert!((population_std_dev(&data, mean) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sum_sq_dev_odd_length() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        // Deviations from 3: 4 + 1 + 0 + 1 + 4
        assert!((sum_sq_dev_simd(&data, 3.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_gains_losses_simd() {
        let data = vec![10.0, 12.0, 11.0, 11.0, 14.0, 9.0, 10.0];
        let (gains, losses) = gains_losses_simd(&data);

        assert_eq!(gains, vec![2.0, 0.0, 0.0, 3.0, 0.0, 1.0]);
        assert_eq!(losses, vec![0.0, 1.0, 0.0, 0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(sum_simd(&[]), 0.0);
        assert_eq!(population_std_dev(&[], 0.0), 0.0);
        assert!(gains_losses_simd(&[1.0]).0.is_empty());
    }
}
