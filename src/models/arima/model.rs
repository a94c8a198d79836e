//! ARIMA (Autoregressive Integrated Moving Average) model.

use chrono::{DateTime, Duration, Utc};

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{difference, integrate};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::{mean, quantile_normal};

/// ARIMA model order: AR lag count, differencing degree, MA lag count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ArimaOrder {
    /// Create a new ARIMA order.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Total number of estimated parameters (AR + MA + intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Everything produced by a successful fit.
///
/// Populated atomically: a failed fit leaves the model without any of it.
#[derive(Debug, Clone)]
struct FittedState {
    /// AR coefficients.
    ar: Vec<f64>,
    /// MA coefficients.
    ma: Vec<f64>,
    /// Intercept (mean of the differenced series).
    intercept: f64,
    /// Original training values (anchor integration back to raw units).
    original: Vec<f64>,
    /// Differenced training series.
    differenced: Vec<f64>,
    /// Residuals on the differenced scale, one per differenced observation.
    diff_residuals: Vec<f64>,
    /// Residual sequence exposed to callers: the trailing
    /// `n - max(p, d)` differenced-scale residuals.
    residuals: Vec<f64>,
    /// Residual variance after the recurrence warm-up.
    residual_variance: f64,
    /// Last training timestamp.
    last_timestamp: DateTime<Utc>,
    /// Training sampling interval.
    interval: Duration,
}

/// ARIMA forecasting model.
///
/// ARIMA(p, d, q) combines an AR(p) autoregressive component, `d` rounds of
/// differencing for stationarity, and an MA(q) moving average component.
/// Parameters are estimated by minimizing the conditional sum of squares
/// with a Nelder-Mead simplex search.
#[derive(Debug, Clone)]
pub struct Arima {
    order: ArimaOrder,
    max_iter: usize,
    tolerance: f64,
    fitted: Option<FittedState>,
}

impl Arima {
    /// Create a new ARIMA model with the given order.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self::with_order(ArimaOrder::new(p, d, q))
    }

    /// Create a new ARIMA model from an [`ArimaOrder`].
    pub fn with_order(order: ArimaOrder) -> Self {
        Self {
            order,
            max_iter: 2000,
            tolerance: 1e-8,
            fitted: None,
        }
    }

    /// Set the optimizer iteration budget (default 2000).
    ///
    /// Estimation fails with [`ForecastError::NonConvergence`] when the
    /// budget expires before the tolerance is met.
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the relative convergence tolerance (default 1e-8).
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Get the model order.
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Get AR coefficients. Empty before a successful fit.
    pub fn ar_coefficients(&self) -> &[f64] {
        self.fitted.as_ref().map(|s| s.ar.as_slice()).unwrap_or(&[])
    }

    /// Get MA coefficients. Empty before a successful fit.
    pub fn ma_coefficients(&self) -> &[f64] {
        self.fitted.as_ref().map(|s| s.ma.as_slice()).unwrap_or(&[])
    }

    /// Get the intercept, if fitted.
    pub fn intercept(&self) -> Option<f64> {
        self.fitted.as_ref().map(|s| s.intercept)
    }

    /// Calculate the conditional sum of squares for given parameters.
    fn calculate_css(
        diff_series: &[f64],
        p: usize,
        q: usize,
        ar: &[f64],
        ma: &[f64],
        intercept: f64,
    ) -> f64 {
        let n = diff_series.len();
        let start = p.max(q);

        if n <= start {
            return f64::MAX;
        }

        let mut residuals = vec![0.0; n];
        let mut css = 0.0;

        for t in start..n {
            let mut pred = intercept;

            // AR component
            for i in 0..p {
                pred += ar[i] * (diff_series[t - 1 - i] - intercept);
            }

            // MA component
            for i in 0..q {
                pred += ma[i] * residuals[t - 1 - i];
            }

            let error = diff_series[t] - pred;
            residuals[t] = error;
            css += error * error;
        }

        css
    }

    /// Estimate intercept and AR/MA coefficients on the differenced series.
    fn estimate_parameters(&self, diff_series: &[f64]) -> Result<(f64, Vec<f64>, Vec<f64>)> {
        let p = self.order.p;
        let q = self.order.q;

        let diff_mean = mean(diff_series);

        if p == 0 && q == 0 {
            // Just the mean, nothing to optimize
            return Ok((diff_mean, vec![], vec![]));
        }

        let n_params = p + q + 1;
        let mut initial = vec![0.0; n_params];
        initial[0] = diff_mean; // intercept

        for i in 0..p {
            initial[1 + i] = 0.1 / (i + 1) as f64;
        }
        for i in 0..q {
            initial[1 + p + i] = 0.1 / (i + 1) as f64;
        }

        // AR and MA coefficients bounded for stationarity/invertibility
        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)]; // intercept
        for _ in 0..p {
            bounds.push((-0.99, 0.99));
        }
        for _ in 0..q {
            bounds.push((-0.99, 0.99));
        }

        let config = NelderMeadConfig {
            max_iter: self.max_iter,
            tolerance: self.tolerance,
            ..Default::default()
        };

        let result = nelder_mead(
            |params| {
                let intercept = params[0];
                let ar = &params[1..1 + p];
                let ma = &params[1 + p..];
                Self::calculate_css(diff_series, p, q, ar, ma, intercept)
            },
            &initial,
            Some(&bounds),
            config,
        );

        if !result.converged {
            return Err(ForecastError::NonConvergence {
                iterations: result.iterations,
            });
        }

        let intercept = result.optimal_point[0];
        let ar = result.optimal_point[1..1 + p].to_vec();
        let ma = result.optimal_point[1 + p..].to_vec();
        Ok((intercept, ar, ma))
    }

    /// Compute residuals on the differenced scale.
    ///
    /// Entries before the recurrence warm-up `max(p, q)` stay zero.
    fn calculate_residuals(
        diff_series: &[f64],
        p: usize,
        q: usize,
        ar: &[f64],
        ma: &[f64],
        intercept: f64,
    ) -> (Vec<f64>, f64) {
        let n = diff_series.len();
        let start = p.max(q);

        let mut residuals = vec![0.0; n];

        for t in start..n {
            let mut pred = intercept;

            for i in 0..p {
                pred += ar[i] * (diff_series[t - 1 - i] - intercept);
            }
            for i in 0..q {
                pred += ma[i] * residuals[t - 1 - i];
            }

            residuals[t] = diff_series[t] - pred;
        }

        let valid = &residuals[start..];
        let variance = if valid.is_empty() {
            0.0
        } else {
            valid.iter().map(|r| r * r).sum::<f64>() / valid.len() as f64
        };

        (residuals, variance)
    }
}

impl Default for Arima {
    fn default() -> Self {
        Self::with_order(ArimaOrder::default())
    }
}

impl Forecaster for Arima {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if series.has_missing_values() {
            return Err(ForecastError::MissingValues);
        }

        let values = series.values();
        let n = values.len();
        let min_len = self.order.p + self.order.d + self.order.q + 1;
        if n < min_len {
            return Err(ForecastError::InsufficientData {
                needed: min_len,
                got: n,
            });
        }

        // Forecast timestamps continue at the training sampling interval
        let interval = series.sampling_interval()?;
        let last_timestamp = series
            .last_timestamp()
            .ok_or(ForecastError::EmptyData)?;

        let diff_series = difference(values, self.order.d);

        let (intercept, ar, ma) = self.estimate_parameters(&diff_series)?;

        let (diff_residuals, residual_variance) = Self::calculate_residuals(
            &diff_series,
            self.order.p,
            self.order.q,
            &ar,
            &ma,
            intercept,
        );

        // Residual contract: one residual per training observation after the
        // first max(p, d) burn-in points.
        let keep = n - self.order.p.max(self.order.d);
        let residuals = diff_residuals[diff_residuals.len() - keep..].to_vec();

        self.fitted = Some(FittedState {
            ar,
            ma,
            intercept,
            original: values.to_vec(),
            differenced: diff_series,
            diff_residuals,
            residuals,
            residual_variance,
            last_timestamp,
            interval,
        });

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let state = self.fitted.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be at least 1".to_string(),
            ));
        }

        let p = self.order.p;
        let q = self.order.q;

        // Forecast recursively on the differenced scale
        let mut extended_diff = state.differenced.clone();
        let mut extended_residuals = state.diff_residuals.clone();

        for _ in 0..horizon {
            let t = extended_diff.len();
            let mut pred = state.intercept;

            for i in 0..p {
                if t > i {
                    pred += state.ar[i] * (extended_diff[t - 1 - i] - state.intercept);
                }
            }
            // Future shocks are zero; only observed residuals contribute
            for i in 0..q {
                if t > i {
                    pred += state.ma[i] * extended_residuals[t - 1 - i];
                }
            }

            extended_diff.push(pred);
            extended_residuals.push(0.0);
        }

        let forecast_diff: Vec<f64> = extended_diff[state.differenced.len()..].to_vec();

        // Integrate back to original units
        let predictions = if self.order.d > 0 {
            integrate(&forecast_diff, &state.original, self.order.d)
        } else {
            forecast_diff
        };

        let timestamps: Vec<DateTime<Utc>> = (1..=horizon)
            .map(|i| state.last_timestamp + state.interval * i as i32)
            .collect();

        Forecast::from_parts(timestamps, predictions)
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        if !(0.0 < level && level < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "interval level must be in (0, 1)".to_string(),
            ));
        }

        let forecast = self.predict(horizon)?;
        let state = self.fitted.as_ref().ok_or(ForecastError::FitRequired)?;
        let variance = state.residual_variance;

        let z = quantile_normal((1.0 + level) / 2.0);
        let preds = forecast.values();

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        // Forecast variance grows with the horizon
        for h in 1..=horizon {
            let se = (variance * h as f64).sqrt();
            lower.push(preds[h - 1] - z * se);
            upper.push(preds[h - 1] + z * se);
        }

        Forecast::with_intervals(
            forecast.timestamps().to_vec(),
            preds.to_vec(),
            lower,
            upper,
        )
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|s| s.residuals.as_slice())
    }

    fn name(&self) -> &str {
        "ARIMA"
    }
}
