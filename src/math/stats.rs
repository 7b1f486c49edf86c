//! Summary statistics for Monte Carlo probability draws.
//!
//! The external predictor reports its uncertainty as the mean, standard
//! deviation, and 5th/95th percentiles of a sample set; the offline
//! predictor in `data::sample` needs the same summaries.

/// Arithmetic mean. Returns 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator). Returns 0 for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Percentile with linear interpolation between order statistics.
///
/// `q` is in `[0, 100]`. Matches the numpy default used by the reference
/// predictor, so offline and live summaries agree in shape.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q = q.clamp(0.0, 100.0);
    let rank = q / 100.0 * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_basic() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((mean(&values) - 2.5).abs() < 1e-12);
        // Sample variance = (2.25 + 0.25 + 0.25 + 2.25) / 3
        let expected = (5.0f64 / 3.0).sqrt();
        assert!((sample_std(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn std_of_constant_series_is_zero() {
        let values = [0.7, 0.7, 0.7];
        assert!(sample_std(&values).abs() < 1e-12);
    }

    #[test]
    fn percentile_interpolates() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&values, 0.0) - 0.0).abs() < 1e-12);
        assert!((percentile(&values, 100.0) - 4.0).abs() < 1e-12);
        assert!((percentile(&values, 50.0) - 2.0).abs() < 1e-12);
        // Rank 0.05 * 4 = 0.2 -> between first and second values.
        assert!((percentile(&values, 5.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn percentile_handles_unsorted_input() {
        let values = [4.0, 0.0, 3.0, 1.0, 2.0];
        assert!((percentile(&values, 50.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_do_not_panic() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_std(&[]), 0.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(sample_std(&[0.5]), 0.0);
    }
}
