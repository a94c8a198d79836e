//! Per-zone forecasting pipeline.
//!
//! One pipeline invocation per zone: split off a held-out tail, fit a fresh
//! ARIMA model on the training prefix, forecast over the holdout horizon,
//! and score the forecast against the tail. Zones share nothing; each run
//! owns its own series, model, forecast, and report.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;
use crate::models::{Arima, ArimaOrder, BoxedForecaster};
use crate::prepare;
use crate::utils::metrics::{evaluate, AccuracyReport};

/// The three independently metered consumption zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Zone1,
    Zone2,
    Zone3,
}

impl Zone {
    /// All zones, in dataset order.
    pub const ALL: [Zone; 3] = [Zone::Zone1, Zone::Zone2, Zone::Zone3];

    /// The dataset column name for this zone.
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Zone1 => "PowerConsumption_Zone1",
            Zone::Zone2 => "PowerConsumption_Zone2",
            Zone::Zone3 => "PowerConsumption_Zone3",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tunable parameters of the pipeline: the ARIMA order and the shared
/// forecast/holdout horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// ARIMA order applied to every zone.
    pub order: ArimaOrder,
    /// Forecast horizon; also the held-out tail length.
    pub horizon: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            order: ArimaOrder::new(1, 1, 1),
            horizon: 30,
        }
    }
}

impl PipelineConfig {
    /// Create a config from an order and horizon.
    pub fn new(order: ArimaOrder, horizon: usize) -> Self {
        Self { order, horizon }
    }
}

/// Output of one zone pipeline run: plain data for downstream reporting or
/// plotting collaborators. The core never renders anything itself.
#[derive(Debug, Clone)]
pub struct ZoneForecast {
    /// Which zone this run modeled.
    pub zone: Zone,
    /// Multi-step forecast over the holdout horizon.
    pub forecast: Forecast,
    /// In-sample residual sequence from the fitted model.
    pub residuals: Vec<f64>,
    /// Accuracy of the forecast against the held-out tail.
    pub report: AccuracyReport,
}

/// Run the full pipeline for one zone.
///
/// The model is constructed inside the call as a boxed [`Forecaster`], so
/// repeated invocations never share fitted state and the rest of the
/// pipeline only sees the trait surface.
pub fn run_zone(zone: Zone, series: &TimeSeries, config: &PipelineConfig) -> Result<ZoneForecast> {
    let (train, holdout) = prepare::split(series, config.horizon)?;
    prepare::validate_for_fit(&train)?;

    let mut model: BoxedForecaster = Box::new(Arima::with_order(config.order));
    model.fit(&train)?;

    let forecast = model.predict(config.horizon)?;
    let report = evaluate(&forecast, &holdout)?;

    let residuals = model
        .residuals()
        .map(|r| r.to_vec())
        .unwrap_or_default();

    Ok(ZoneForecast {
        zone,
        forecast,
        residuals,
        report,
    })
}

/// Run the pipeline for several zones, fail-fast on the first error.
///
/// Each `(zone, series)` entry gets its own independent model fit.
pub fn run_zones<'a, I>(series_by_zone: I, config: &PipelineConfig) -> Result<Vec<ZoneForecast>>
where
    I: IntoIterator<Item = (Zone, &'a TimeSeries)>,
{
    series_by_zone
        .into_iter()
        .map(|(zone, series)| run_zone(zone, series, config))
        .collect()
}
