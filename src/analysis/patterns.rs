//! Recurring weather pattern discovery.
//!
//! Groups days by clustering the standardized feature matrix, then
//! characterizes each group in plain language using its raw-value means.
//! Seasonal aggregates ride along so callers see both views; they are
//! computed from dates directly and survive a clustering failure.

use serde::Serialize;
use tracing::warn;

use crate::analysis::features::{
    FeatureMatrix, DIM_HUMIDITY, DIM_RAIN, DIM_TEMP_AVG, DIM_WIND,
};
use crate::analysis::model::ClusterModel;
use crate::climate::{seasonal_aggregates, SeasonalAggregate};
use crate::data::WeatherSeries;
use crate::season::Hemisphere;
use crate::utils::stats;

/// One clustered weather regime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterInfo {
    pub id: usize,
    pub size: usize,
    pub percentage: f64,
    pub avg_temp: f64,
    pub avg_rain: f64,
    pub avg_humidity: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternFindings {
    pub clusters: Vec<ClusterInfo>,
    pub seasonal_patterns: Vec<SeasonalAggregate>,
}

/// Clusters the window into weather regimes. A clustering failure leaves
/// `clusters` empty; seasonal aggregates are always reported.
pub fn identify_patterns(
    series: &WeatherSeries,
    features: &FeatureMatrix,
    hemisphere: Hemisphere,
    model: &dyn ClusterModel,
) -> PatternFindings {
    let mut findings = PatternFindings {
        clusters: Vec::new(),
        seasonal_patterns: seasonal_aggregates(series, hemisphere),
    };

    let assignments = match model.assign_clusters(&features.standardized()) {
        Ok(assignments) => assignments,
        Err(err) => {
            warn!(error = %err, "pattern clustering unavailable");
            return findings;
        }
    };

    let cluster_count = assignments.iter().max().map(|&m| m + 1).unwrap_or(0);
    let total = features.len();
    for id in 0..cluster_count {
        let members: Vec<usize> = assignments
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == id)
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            continue;
        }

        let column_mean = |dim: usize| {
            let values: Vec<f64> = members.iter().map(|&i| features.rows()[i][dim]).collect();
            stats::mean(&values)
        };
        let avg_temp = column_mean(DIM_TEMP_AVG);
        let avg_rain = column_mean(DIM_RAIN);
        let avg_humidity = column_mean(DIM_HUMIDITY);
        let avg_wind = column_mean(DIM_WIND);

        findings.clusters.push(ClusterInfo {
            id,
            size: members.len(),
            percentage: members.len() as f64 / total as f64 * 100.0,
            avg_temp,
            avg_rain,
            avg_humidity,
            description: cluster_description(avg_temp, avg_rain, avg_humidity, avg_wind),
        });
    }

    findings
}

/// Plain-language label for a cluster from its raw means.
fn cluster_description(avg_temp: f64, avg_rain: f64, avg_humidity: f64, avg_wind: f64) -> String {
    let temp_desc = if avg_temp < 5.0 {
        "cold"
    } else if avg_temp < 15.0 {
        "cool"
    } else if avg_temp < 25.0 {
        "mild"
    } else {
        "hot"
    };

    let rain_desc = if avg_rain < 0.1 {
        "dry"
    } else if avg_rain < 2.0 {
        "light precipitation"
    } else if avg_rain < 10.0 {
        "moderate precipitation"
    } else {
        "heavy precipitation"
    };

    let humidity_desc = if avg_humidity < 40.0 {
        "low humidity"
    } else if avg_humidity < 70.0 {
        "moderate humidity"
    } else {
        "high humidity"
    };

    let wind_desc = if avg_wind < 3.0 {
        "light winds"
    } else if avg_wind < 7.0 {
        "moderate winds"
    } else {
        "strong winds"
    };

    format!("{temp_desc} days with {rain_desc}, {humidity_desc}, and {wind_desc}")
}
