//! Property-based tests for the forecasting pipeline.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated time series data.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use zonecast::core::TimeSeries;
use zonecast::models::{Arima, Forecaster};
use zonecast::prepare;
use zonecast::utils::calculate_report;

/// Create a TimeSeries from a vector of values on an hourly grid.
fn make_ts(values: &[f64]) -> TimeSeries {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps: Vec<_> = (0..values.len())
        .map(|i| base + Duration::hours(i as i64))
        .collect();
    TimeSeries::new(timestamps, values.to_vec()).unwrap()
}

/// Strategy for generating time series with trend.
///
/// Trending data keeps the differenced series well behaved, so the
/// estimator converges for every sampled case.
fn trending_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        (10.0..100.0_f64, 0.1..2.0_f64)
            .prop_map(move |(base, slope)| (0..len).map(|i| base + slope * i as f64).collect())
    })
}

/// Strategy for paired forecast/truth slices of equal length.
fn paired_values_strategy(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-1000.0..1000.0_f64, len),
            prop::collection::vec(-1000.0..1000.0_f64, len),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn forecast_length_matches_horizon(
        values in trending_values_strategy(20, 100),
        horizon in 1usize..20
    ) {
        let ts = make_ts(&values);
        let mut model = Arima::new(1, 1, 0);
        model.fit(&ts).unwrap();
        let forecast = model.predict(horizon).unwrap();
        prop_assert_eq!(forecast.horizon(), horizon);
    }

    #[test]
    fn forecast_timestamps_are_contiguous(
        values in trending_values_strategy(20, 80),
        horizon in 1usize..15
    ) {
        let ts = make_ts(&values);
        let last = ts.last_timestamp().unwrap();

        let mut model = Arima::new(1, 1, 0);
        model.fit(&ts).unwrap();
        let forecast = model.predict(horizon).unwrap();

        let stamps = forecast.timestamps();
        prop_assert_eq!(stamps[0], last + Duration::hours(1));
        for w in stamps.windows(2) {
            prop_assert_eq!(w[1] - w[0], Duration::hours(1));
        }
    }

    #[test]
    fn repeated_prediction_is_deterministic(
        values in trending_values_strategy(20, 80),
        horizon in 1usize..15
    ) {
        let ts = make_ts(&values);
        let mut model = Arima::new(1, 1, 0);
        model.fit(&ts).unwrap();

        let first = model.predict(horizon).unwrap();
        let second = model.predict(horizon).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn residual_length_contract_holds(
        values in trending_values_strategy(20, 100)
    ) {
        let ts = make_ts(&values);
        let mut model = Arima::new(1, 1, 0);
        model.fit(&ts).unwrap();

        // Burn-in is max(p, d) = 1
        prop_assert_eq!(model.residuals().unwrap().len(), values.len() - 1);
    }

    #[test]
    fn split_partitions_exactly(
        values in trending_values_strategy(5, 100),
        holdout_frac in 0.1..0.9_f64
    ) {
        let ts = make_ts(&values);
        let holdout = ((values.len() as f64 * holdout_frac) as usize).max(1);
        prop_assume!(holdout < values.len());

        let (train, tail) = prepare::split(&ts, holdout).unwrap();
        prop_assert_eq!(train.len() + tail.len(), ts.len());
        prop_assert_eq!(tail.len(), holdout);
        prop_assert_eq!(&ts.values()[..train.len()], train.values());
        prop_assert_eq!(&ts.values()[train.len()..], tail.values());
    }

    #[test]
    fn mae_never_exceeds_rmse(
        (actual, predicted) in paired_values_strategy(50)
    ) {
        let report = calculate_report(&actual, &predicted).unwrap();
        prop_assert!(report.mae <= report.rmse + 1e-9);
        prop_assert!(report.rmse >= 0.0);
        prop_assert!((report.rmse * report.rmse - report.mse).abs() <= 1e-6 * (1.0 + report.mse));
    }

    #[test]
    fn zero_error_iff_identical(
        values in prop::collection::vec(-100.0..100.0_f64, 1..30)
    ) {
        let report = calculate_report(&values, &values).unwrap();
        prop_assert_eq!(report.mae, 0.0);
        prop_assert_eq!(report.mse, 0.0);
        prop_assert_eq!(report.rmse, 0.0);

        // Perturbing any single point makes every metric strictly positive
        let mut perturbed = values.clone();
        perturbed[0] += 1.0;
        let report = calculate_report(&values, &perturbed).unwrap();
        prop_assert!(report.mae > 0.0);
        prop_assert!(report.mse > 0.0);
        prop_assert!(report.rmse > 0.0);
    }
}
