//! Shared utilities.

pub mod stats;

pub use stats::{linear_fit, mean, quantile, rolling_mean, std_dev};
