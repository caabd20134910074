//! Small numeric helpers shared by the reducers.

/// Rounds to 2 decimal places, the crate-wide precision for reported
/// statistics.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the exact median over a fully materialized value set.
/// Returns 0.0 for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.499999), 12.5);
        assert_eq!(round2(1.666666), 1.67);
        assert_eq!(round2(-0.005), -0.01);
        assert_eq!(round2(3.0), 3.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[10.0, 30.0]), 20.0);
        assert_eq!(mean(&[5.0]), 5.0);
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[30.0, 10.0, 20.0]), 20.0);
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[40.0, 10.0, 20.0, 30.0]), 25.0);
    }

    #[test]
    fn test_median_empty_and_single() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[7.5]), 7.5);
    }
}
