//! Utility functions for forecasting models.

pub mod metrics;
pub mod optimization;
pub mod stats;

pub use metrics::{calculate_report, evaluate, AccuracyReport};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use stats::quantile_normal;
