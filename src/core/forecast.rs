//! Forecast result structure for holding timestamped predictions.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// A forecast: one point estimate per future timestamp, with optional
/// prediction interval bounds.
///
/// Timestamps are contiguous at the training sampling interval, starting
/// immediately after the last training timestamp. Read-only once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    timestamps: Vec<DateTime<Utc>>,
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create a forecast from timestamps and point estimates.
    pub fn from_parts(timestamps: Vec<DateTime<Utc>>, point: Vec<f64>) -> Result<Self> {
        if timestamps.len() != point.len() {
            return Err(ForecastError::LengthMismatch {
                expected: timestamps.len(),
                got: point.len(),
            });
        }
        Ok(Self {
            timestamps,
            point,
            lower: None,
            upper: None,
        })
    }

    /// Create a forecast with prediction interval bounds.
    pub fn with_intervals(
        timestamps: Vec<DateTime<Utc>>,
        point: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self> {
        let mut forecast = Self::from_parts(timestamps, point)?;
        if lower.len() != forecast.point.len() || upper.len() != forecast.point.len() {
            return Err(ForecastError::LengthMismatch {
                expected: forecast.point.len(),
                got: lower.len().min(upper.len()),
            });
        }
        forecast.lower = Some(lower);
        forecast.upper = Some(upper);
        Ok(forecast)
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Get the forecast timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get the point estimates.
    pub fn values(&self) -> &[f64] {
        &self.point
    }

    /// Iterate over `(timestamp, estimate)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.point.iter().copied())
    }

    /// Check if interval bounds are available.
    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Get the lower interval bounds, if present.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Get the upper interval bounds, if present.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }
}
