//! Feature extraction for the statistical models.
//!
//! Every analysis model consumes the same six-column matrix, one row per
//! daily record. Column order is part of the contract: anomaly
//! explanations index into rows by these constants.

use crate::data::WeatherSeries;
use crate::utils::stats;

pub const DIM_TEMP_AVG: usize = 0;
pub const DIM_TEMP_MIN: usize = 1;
pub const DIM_TEMP_MAX: usize = 2;
pub const DIM_HUMIDITY: usize = 3;
pub const DIM_RAIN: usize = 4;
pub const DIM_WIND: usize = 5;
pub const FEATURE_DIMS: usize = 6;

/// Dense row-major feature matrix with a fixed column layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<[f64; FEATURE_DIMS]>,
}

impl FeatureMatrix {
    /// One row per record, in series order.
    pub fn from_series(series: &WeatherSeries) -> Self {
        let rows = series
            .records()
            .iter()
            .map(|r| [r.temp_avg, r.temp_min, r.temp_max, r.humidity_avg, r.rain_sum, r.wind_speed])
            .collect();
        FeatureMatrix { rows }
    }

    pub fn rows(&self) -> &[[f64; FEATURE_DIMS]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, dim: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[dim]).collect()
    }

    /// Z-score standardization per column. A constant column maps to zeros.
    pub fn standardized(&self) -> FeatureMatrix {
        if self.rows.is_empty() {
            return FeatureMatrix::default();
        }

        let mut means = [0.0; FEATURE_DIMS];
        let mut stds = [0.0; FEATURE_DIMS];
        for dim in 0..FEATURE_DIMS {
            let column = self.column(dim);
            means[dim] = stats::mean(&column);
            let std = stats::std_dev(&column);
            stds[dim] = if std > 0.0 { std } else { 1.0 };
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut scaled = [0.0; FEATURE_DIMS];
                for dim in 0..FEATURE_DIMS {
                    scaled[dim] = (row[dim] - means[dim]) / stds[dim];
                }
                scaled
            })
            .collect();
        FeatureMatrix { rows }
    }
}
