//! # zonecast
//!
//! Short-horizon electricity consumption forecasting for independently
//! metered zones.
//!
//! Each zone's historical consumption is a univariate [`core::TimeSeries`].
//! The pipeline splits off a held-out tail, fits a fixed-order
//! [`models::Arima`] model on the training prefix, produces a multi-step
//! [`core::Forecast`], and scores it against the tail as an
//! [`utils::AccuracyReport`] (MAE/MSE/RMSE). [`pipeline::run_zones`] runs
//! the same three-stage pipeline once per zone, with no shared state.
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use zonecast::core::TimeSeries;
//! use zonecast::pipeline::{run_zone, PipelineConfig, Zone};
//!
//! let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let timestamps: Vec<_> = (0..120)
//!     .map(|i| base + Duration::minutes(10 * i))
//!     .collect();
//! let values: Vec<f64> = (0..120).map(|i| 32_000.0 + 15.0 * i as f64).collect();
//! let series = TimeSeries::new(timestamps, values).unwrap();
//!
//! let config = PipelineConfig::default(); // ARIMA(1,1,1), horizon 30
//! let outcome = run_zone(Zone::Zone1, &series, &config).unwrap();
//! assert_eq!(outcome.forecast.horizon(), 30);
//! ```

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod prepare;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Arima, ArimaOrder, Forecaster};
    pub use crate::pipeline::{run_zone, run_zones, PipelineConfig, Zone, ZoneForecast};
    pub use crate::utils::{calculate_report, evaluate, AccuracyReport};
}
