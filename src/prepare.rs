//! Series preparation: validation and train/holdout splitting.
//!
//! Pure functions over their inputs; no state, no side effects.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};

/// Split a series into a training prefix and a held-out evaluation tail.
///
/// The training prefix is every observation before the last `holdout`
/// points; the tail is exactly the last `holdout` points in order. Requires
/// `0 < holdout < series.len()`.
pub fn split(series: &TimeSeries, holdout: usize) -> Result<(TimeSeries, TimeSeries)> {
    if holdout == 0 {
        return Err(ForecastError::InvalidParameter(
            "holdout length must be positive".to_string(),
        ));
    }
    if series.len() <= holdout {
        return Err(ForecastError::InsufficientData {
            needed: holdout + 1,
            got: series.len(),
        });
    }

    let cut = series.len() - holdout;
    let train = series.slice(0, cut)?;
    let tail = series.slice(cut, series.len())?;
    Ok((train, tail))
}

/// Validate a series before fitting.
///
/// The fit step requires a non-empty series with no missing values; gaps in
/// the data must be handled upstream, never imputed silently here.
pub fn validate_for_fit(series: &TimeSeries) -> Result<()> {
    if series.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if series.has_missing_values() {
        return Err(ForecastError::MissingValues);
    }
    Ok(())
}
