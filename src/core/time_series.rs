//! TimeSeries data structure for representing a single metered zone.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// A univariate time series with strictly increasing timestamps.
///
/// One instance per zone; constructed once from the external data source and
/// not mutated by the pipeline afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    frequency: Option<Duration>,
}

impl TimeSeries {
    /// Create a time series from timestamps and values.
    ///
    /// Timestamps must be strictly increasing (duplicates are rejected) and
    /// there must be exactly one value per timestamp.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if values.len() != timestamps.len() {
            return Err(ForecastError::LengthMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(ForecastError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(Self {
            timestamps,
            values,
            frequency: None,
        })
    }

    /// Create a time series with an explicit sampling interval.
    pub fn with_frequency(
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<f64>,
        frequency: Duration,
    ) -> Result<Self> {
        let mut series = Self::new(timestamps, values)?;
        series.frequency = Some(frequency);
        Ok(series)
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the last timestamp, if any.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Get the explicit sampling interval, if set.
    pub fn frequency(&self) -> Option<Duration> {
        self.frequency
    }

    /// Set the sampling interval.
    pub fn set_frequency(&mut self, freq: Duration) {
        self.frequency = Some(freq);
    }

    /// Check if the series has missing values (NaN or infinite).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| v.is_nan() || v.is_infinite())
    }

    /// Extract a half-open slice `[start, end)` of the time series.
    ///
    /// The sampling interval, if set, is carried over.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "slice end {} exceeds series length {}",
                end,
                self.len()
            )));
        }

        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
            frequency: self.frequency,
        })
    }

    /// Infer the sampling interval from the modal timestamp spacing.
    ///
    /// `tolerance` is the minimum share of spacings the modal spacing must
    /// account for (0.5 means a strict majority).
    pub fn infer_frequency(&self, tolerance: f64) -> Result<Duration> {
        if self.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: self.len(),
            });
        }

        let diffs: Vec<i64> = self
            .timestamps
            .windows(2)
            .map(|w| (w[1] - w[0]).num_seconds())
            .collect();

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for &diff in &diffs {
            *counts.entry(diff).or_insert(0) += 1;
        }

        let (modal_diff, modal_count) = counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&diff, &count)| (diff, count))
            .ok_or(ForecastError::FrequencyInference(
                "empty spacing data".to_string(),
            ))?;

        let total_count: usize = counts.values().sum();
        let modal_ratio = modal_count as f64 / total_count as f64;

        if modal_ratio < tolerance {
            return Err(ForecastError::FrequencyInference(
                "no unique modal spacing found".to_string(),
            ));
        }

        Ok(Duration::seconds(modal_diff))
    }

    /// Resolve the sampling interval: explicit frequency if set, otherwise
    /// inferred from timestamps with a majority tolerance.
    pub fn sampling_interval(&self) -> Result<Duration> {
        match self.frequency {
            Some(freq) => Ok(freq),
            None => self.infer_frequency(0.5),
        }
    }
}
