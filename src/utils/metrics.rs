//! Accuracy metrics for forecast evaluation.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};

/// Accuracy report for one forecast against held-out ground truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyReport {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

/// Calculate an accuracy report between actual and predicted values.
///
/// Values are aligned by position; the caller is responsible for matching
/// timestamps. Both slices must be non-empty and of equal length.
pub fn calculate_report(actual: &[f64], predicted: &[f64]) -> Result<AccuracyReport> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    if actual.len() != predicted.len() {
        return Err(ForecastError::LengthMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;

    let mae: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mse: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;

    let rmse = mse.sqrt();

    Ok(AccuracyReport { mae, mse, rmse })
}

/// Evaluate a forecast against a held-out tail of observations.
///
/// Convenience wrapper over [`calculate_report`] aligning the forecast's
/// point estimates with the tail's values by position.
pub fn evaluate(forecast: &Forecast, ground_truth: &TimeSeries) -> Result<AccuracyReport> {
    calculate_report(ground_truth.values(), forecast.values())
}

/// Calculate MAE between two slices.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Calculate MSE between two slices.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Calculate RMSE between two slices.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}
