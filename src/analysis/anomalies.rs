//! Anomalous-day detection and plain-language explanations.
//!
//! Flags the most isolated days of the window with the outlier model, then
//! explains each flagged day by comparing it against the 5th/95th
//! percentiles of the raw feature columns. Model failures degrade to a
//! fixed message instead of propagating.

use serde::Serialize;
use tracing::warn;

use crate::analysis::features::{
    FeatureMatrix, DIM_HUMIDITY, DIM_RAIN, DIM_TEMP_MAX, DIM_TEMP_MIN, DIM_WIND,
};
use crate::analysis::model::OutlierModel;
use crate::utils::stats;

/// At most this many anomaly descriptions are reported.
const MAX_DESCRIPTIONS: usize = 5;

const FALLBACK_MESSAGE: &str = "Unable to detect weather anomalies due to insufficient data.";

/// Flagged row indices with deduplicated descriptions, capped at five.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnomalyFindings {
    pub indices: Vec<usize>,
    pub descriptions: Vec<String>,
}

/// Column percentiles that decide which reading gets called out.
struct UnusualThresholds {
    temp_max_high: f64,
    temp_min_low: f64,
    rain_high: f64,
    wind_high: f64,
    humidity_high: f64,
    humidity_low: f64,
}

impl UnusualThresholds {
    fn from_features(features: &FeatureMatrix) -> Self {
        UnusualThresholds {
            temp_max_high: stats::quantile(&features.column(DIM_TEMP_MAX), 0.95),
            temp_min_low: stats::quantile(&features.column(DIM_TEMP_MIN), 0.05),
            rain_high: stats::quantile(&features.column(DIM_RAIN), 0.95),
            wind_high: stats::quantile(&features.column(DIM_WIND), 0.95),
            humidity_high: stats::quantile(&features.column(DIM_HUMIDITY), 0.95),
            humidity_low: stats::quantile(&features.column(DIM_HUMIDITY), 0.05),
        }
    }
}

/// Detects anomalous rows and explains them. On model failure the result
/// carries the fallback message and no indices.
pub fn detect_anomalies(features: &FeatureMatrix, model: &dyn OutlierModel) -> AnomalyFindings {
    let mut result = AnomalyFindings::default();

    let indices = match model.flag_outliers(&features.standardized()) {
        Ok(indices) => indices,
        Err(err) => {
            warn!(error = %err, "anomaly detection unavailable");
            result.descriptions.push(FALLBACK_MESSAGE.to_string());
            return result;
        }
    };

    let thresholds = UnusualThresholds::from_features(features);
    for &idx in &indices {
        let description = describe_row(&features.rows()[idx], &thresholds);
        if !result.descriptions.contains(&description) {
            result.descriptions.push(description);
        }
    }
    result.descriptions.truncate(MAX_DESCRIPTIONS);
    result.indices = indices;
    result
}

fn describe_row(row: &[f64; 6], thresholds: &UnusualThresholds) -> String {
    let mut unusual = Vec::new();
    if row[DIM_TEMP_MAX] > thresholds.temp_max_high {
        unusual.push(format!(
            "unusually high maximum temperature ({:.1}°C)",
            row[DIM_TEMP_MAX]
        ));
    }
    if row[DIM_TEMP_MIN] < thresholds.temp_min_low {
        unusual.push(format!(
            "unusually low minimum temperature ({:.1}°C)",
            row[DIM_TEMP_MIN]
        ));
    }
    if row[DIM_RAIN] > thresholds.rain_high {
        unusual.push(format!("unusually high rainfall ({:.1}mm)", row[DIM_RAIN]));
    }
    if row[DIM_WIND] > thresholds.wind_high {
        unusual.push(format!("unusually high wind speed ({:.1}m/s)", row[DIM_WIND]));
    }
    if row[DIM_HUMIDITY] > thresholds.humidity_high {
        unusual.push(format!("unusually high humidity ({:.1}%)", row[DIM_HUMIDITY]));
    }
    if row[DIM_HUMIDITY] < thresholds.humidity_low {
        unusual.push(format!("unusually low humidity ({:.1}%)", row[DIM_HUMIDITY]));
    }
    if unusual.is_empty() {
        unusual.push("unusual combination of weather conditions".to_string());
    }
    format!("Weather anomaly detected with {}", unusual.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::IsolationForest;
    use crate::data::{DailyRecord, WeatherSeries};
    use chrono::NaiveDate;

    fn matrix_of(values: Vec<[f64; 6]>) -> FeatureMatrix {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| DailyRecord {
                date: start + chrono::Duration::days(i as i64),
                temp_avg: v[0],
                temp_min: v[1],
                temp_max: v[2],
                humidity_avg: v[3],
                rain_sum: v[4],
                snow_sum: 0.0,
                wind_speed: v[5],
                clouds: 0.0,
            })
            .collect();
        FeatureMatrix::from_series(&WeatherSeries::from_records(records))
    }

    fn typical_row(i: usize) -> [f64; 6] {
        let wiggle = (i % 5) as f64 * 0.2;
        [20.0 + wiggle, 14.0 + wiggle, 26.0 + wiggle, 60.0, 2.0, 3.0]
    }

    #[test]
    fn test_too_little_data_degrades_to_message() {
        let matrix = matrix_of((0..9).map(typical_row).collect());
        let findings = detect_anomalies(&matrix, &IsolationForest::new(1));
        assert!(findings.indices.is_empty());
        assert_eq!(
            findings.descriptions,
            vec!["Unable to detect weather anomalies due to insufficient data."]
        );
    }

    #[test]
    fn test_extreme_day_gets_full_explanation() {
        let mut values: Vec<[f64; 6]> = (0..29).map(typical_row).collect();
        values.push([42.0, 35.0, 49.0, 95.0, 80.0, 25.0]);
        let matrix = matrix_of(values);

        let findings = detect_anomalies(&matrix, &IsolationForest::new(7));
        assert_eq!(findings.indices, vec![29]);
        assert_eq!(
            findings.descriptions,
            vec![
                "Weather anomaly detected with unusually high maximum temperature (49.0°C), \
                 unusually high rainfall (80.0mm), unusually high wind speed (25.0m/s), \
                 unusually high humidity (95.0%)"
            ]
        );
    }

    #[test]
    fn test_identical_anomalies_deduplicate() {
        let mut values: Vec<[f64; 6]> = (0..38).map(typical_row).collect();
        values.push([42.0, 35.0, 49.0, 95.0, 80.0, 25.0]);
        values.push([42.0, 35.0, 49.0, 95.0, 80.0, 25.0]);
        let matrix = matrix_of(values);

        let findings = detect_anomalies(&matrix, &IsolationForest::new(7));
        assert_eq!(findings.indices, vec![38, 39]);
        assert_eq!(findings.descriptions.len(), 1);
    }

    #[test]
    fn test_unremarkable_row_gets_generic_description() {
        let thresholds = UnusualThresholds {
            temp_max_high: 30.0,
            temp_min_low: 0.0,
            rain_high: 20.0,
            wind_high: 10.0,
            humidity_high: 90.0,
            humidity_low: 30.0,
        };
        let description = describe_row(&[20.0, 10.0, 25.0, 60.0, 5.0, 4.0], &thresholds);
        assert_eq!(
            description,
            "Weather anomaly detected with unusual combination of weather conditions"
        );
    }

    #[test]
    fn test_cold_snap_explanation() {
        let thresholds = UnusualThresholds {
            temp_max_high: 30.0,
            temp_min_low: -2.0,
            rain_high: 20.0,
            wind_high: 10.0,
            humidity_high: 90.0,
            humidity_low: 30.0,
        };
        let description = describe_row(&[-5.0, -8.5, -1.0, 25.0, 0.0, 4.0], &thresholds);
        assert_eq!(
            description,
            "Weather anomaly detected with unusually low minimum temperature (-8.5°C), \
             unusually low humidity (25.0%)"
        );
    }
}
