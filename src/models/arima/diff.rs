//! Differencing utilities for ARIMA models.

/// Apply differencing to a time series.
///
/// Each differencing step replaces the series with its successive
/// differences, shortening it by one.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || series.is_empty() {
        return series.to_vec();
    }

    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Integrate (reverse differencing) a forecast produced on the differenced
/// scale back to the original units.
///
/// # Arguments
/// * `differenced` - Forecast values on the differenced scale
/// * `original` - The original training series (anchors the cumulative sums)
/// * `d` - Differencing order used
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || differenced.is_empty() {
        return differenced.to_vec();
    }

    let mut result = differenced.to_vec();

    // Reverse the differencing one level at a time, innermost first
    for level in (0..d).rev() {
        let init_value = if level == 0 {
            *original.last().unwrap_or(&0.0)
        } else {
            let intermediate = difference(original, level);
            *intermediate.last().unwrap_or(&0.0)
        };

        let mut integrated = Vec::with_capacity(result.len());
        let mut cumsum = init_value;
        for &diff in &result {
            cumsum += diff;
            integrated.push(cumsum);
        }
        result = integrated;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_order_0() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = difference(&series, 0);
        assert_eq!(result, series);
    }

    #[test]
    fn difference_order_1() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        let result = difference(&series, 1);
        assert_eq!(result, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn difference_order_2() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        let result = difference(&series, 2);
        // First diff: [2, 3, 4, 5]
        // Second diff: [1, 1, 1]
        assert_eq!(result, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn difference_shortens_by_one_per_step() {
        let series: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert_eq!(difference(&series, 1).len(), 9);
        assert_eq!(difference(&series, 3).len(), 7);
    }

    #[test]
    fn difference_constant_series() {
        let series = vec![5.0, 5.0, 5.0, 5.0];
        let result = difference(&series, 1);
        assert_eq!(result, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn difference_empty() {
        let series: Vec<f64> = vec![];
        let result = difference(&series, 1);
        assert!(result.is_empty());
    }

    #[test]
    fn integrate_reverses_difference() {
        let original = vec![10.0, 12.0, 15.0, 19.0, 24.0];
        let forecast_diff = vec![6.0, 7.0];
        let integrated = integrate(&forecast_diff, &original, 1);

        // Continues from the last value: 24 + 6 = 30, 30 + 7 = 37
        assert_relative_eq!(integrated[0], 30.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 37.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_order_2_continues_pattern() {
        // Second differences of [1, 3, 6, 10, 15] are constant 1
        let original = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        let forecast_diff2 = vec![1.0, 1.0];
        let integrated = integrate(&forecast_diff2, &original, 2);

        // First level: [5 + 1, 6 + 1] = [6, 7]; then [15 + 6, 21 + 7]
        assert_relative_eq!(integrated[0], 21.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 28.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_order_0_is_identity() {
        let values = vec![1.0, 2.0];
        assert_eq!(integrate(&values, &[9.0], 0), values);
    }
}
