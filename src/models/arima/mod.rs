//! ARIMA (Autoregressive Integrated Moving Average) model.
//!
//! Fixed-order ARIMA(p, d, q) with conditional-sum-of-squares estimation:
//! difference `d` times, fit the ARMA(p, q) recurrence by Nelder-Mead, and
//! integrate forecasts back to original units.

mod diff;
mod model;

pub use diff::{difference, integrate};
pub use model::{Arima, ArimaOrder};
