//! Forecaster trait defining the common interface for models.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;

/// Common interface for forecasting models.
///
/// Object-safe, so pipelines can hold models behind `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the time series data.
    ///
    /// Succeeds or fails atomically: on error the model keeps whatever
    /// fitted state it had before the call (none, for a fresh model).
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Generate point predictions for the specified horizon (>= 1).
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Generate predictions with confidence intervals.
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        // Default implementation just returns point predictions
        let _ = level;
        self.predict(horizon)
    }

    /// Get the in-sample residual sequence, if fitted.
    fn residuals(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.residuals().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::arima::Arima;
    use chrono::{Duration, TimeZone, Utc};

    fn make_test_series(n: usize) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..n).map(|i| base + Duration::hours(i as i64)).collect();
        let values: Vec<f64> = (0..n).map(|i| 10.0 + 0.2 * i as f64).collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn boxed_forecaster_fit_predict() {
        let mut model: BoxedForecaster = Box::new(Arima::new(1, 1, 0));
        assert_eq!(model.name(), "ARIMA");
        assert!(!model.is_fitted());

        let ts = make_test_series(30);
        model.fit(&ts).unwrap();
        assert!(model.is_fitted());

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.horizon(), 5);
    }

    #[test]
    fn trait_accessors_reflect_fit_state() {
        let mut model = Arima::new(1, 1, 0);
        let ts = make_test_series(30);

        assert!(!model.is_fitted());
        assert!(model.residuals().is_none());

        model.fit(&ts).unwrap();
        assert!(model.is_fitted());
        assert!(model.residuals().is_some());
    }
}
