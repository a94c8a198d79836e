//! Forecasting models.

mod traits;

pub mod arima;

pub use arima::{Arima, ArimaOrder};
pub use traits::{BoxedForecaster, Forecaster};
