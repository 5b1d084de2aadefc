//! Weather analysis pipeline.
//!
//! [`WeatherAnalyzer`] wires the feature extraction, the seeded models and
//! the text generators into one pass over a historical window plus a
//! forecast window, producing the [`AnalysisReport`] bundle consumed by the
//! advisory layers. Every stage degrades to documented fallback text
//! instead of failing, so analysis never aborts the caller.

pub mod anomalies;
pub mod features;
pub mod forecast;
pub mod model;
pub mod patterns;
pub mod trends;

pub use anomalies::{detect_anomalies, AnomalyFindings};
pub use features::FeatureMatrix;
pub use forecast::{predict_upcoming, ForecastOutlook};
pub use model::{ClusterModel, IsolationForest, KMeans, ModelError, OutlierModel};
pub use patterns::{identify_patterns, ClusterInfo, PatternFindings};
pub use trends::{analyze_trends, TrendFindings};

use serde::Serialize;
use tracing::debug;

use crate::data::{ForecastSeries, WeatherSeries};
use crate::season::Hemisphere;
use crate::utils::stats;

/// Default model seed, kept stable so repeated runs agree.
pub const DEFAULT_MODEL_SEED: u64 = 42;

const EMPTY_HISTORY_SUMMARY: &str = "Insufficient historical data for analysis.";
const CLOSING_SENTENCE: &str = "These weather patterns suggest farmers should monitor soil \
     moisture levels closely and adjust irrigation schedules accordingly.";

/// Combined analysis output for one historical plus forecast window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub anomalies: Vec<String>,
    pub trends: Vec<String>,
    pub patterns: PatternFindings,
}

/// Runs the full analysis pipeline with seeded models.
#[derive(Debug, Clone, Copy)]
pub struct WeatherAnalyzer {
    hemisphere: Hemisphere,
    seed: u64,
}

impl WeatherAnalyzer {
    pub fn new(hemisphere: Hemisphere) -> Self {
        Self::with_seed(hemisphere, DEFAULT_MODEL_SEED)
    }

    pub fn with_seed(hemisphere: Hemisphere, seed: u64) -> Self {
        WeatherAnalyzer { hemisphere, seed }
    }

    /// Analyzes one window pair. An empty historical window yields only the
    /// insufficient-data summary.
    pub fn analyze(&self, historical: &WeatherSeries, forecast: &ForecastSeries) -> AnalysisReport {
        if historical.is_empty() {
            return AnalysisReport {
                summary: EMPTY_HISTORY_SUMMARY.to_string(),
                ..AnalysisReport::default()
            };
        }

        let features = FeatureMatrix::from_series(historical);
        debug!(records = features.len(), "analyzing historical window");

        let anomalies = detect_anomalies(&features, &IsolationForest::new(self.seed));
        let clusterer = KMeans::new(KMeans::suggested_k(features.len()), self.seed);
        let patterns = identify_patterns(historical, &features, self.hemisphere, &clusterer);
        let trends = analyze_trends(historical);
        let outlook = predict_upcoming(historical, forecast);

        AnalysisReport {
            summary: build_summary(historical, &anomalies, &trends, &outlook),
            anomalies: anomalies.descriptions,
            trends: trends.descriptions,
            patterns,
        }
    }
}

/// Stitches the component outputs into one narrative paragraph.
fn build_summary(
    historical: &WeatherSeries,
    anomalies: &AnomalyFindings,
    trends: &TrendFindings,
    outlook: &ForecastOutlook,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !historical.is_empty() {
        let avg_temp = stats::mean(&historical.column(|r| r.temp_avg));
        parts.push(format!(
            "Based on historical weather data, this region has an average temperature of \
             {avg_temp:.1}°C."
        ));
        let total_rain: f64 = historical.column(|r| r.rain_sum).iter().sum();
        parts.push(format!(
            "The area has received approximately {total_rain:.0}mm of rainfall over the analyzed \
             period."
        ));
    }

    if !trends.descriptions.is_empty() {
        let mut part = format!(
            "Weather trends analysis reveals that {}",
            trends.descriptions[0].to_lowercase()
        );
        if trends.descriptions.len() > 1 {
            part.push_str(&format!(" and {}", trends.descriptions[1].to_lowercase()));
        }
        parts.push(part);
    }

    if !outlook.forecast_analysis.is_empty() {
        parts.push(outlook.forecast_analysis.clone());
        if let Some(first) = outlook.upcoming_patterns.first() {
            parts.push(first.clone());
        }
    }

    if let Some(first) = anomalies.descriptions.first() {
        parts.push(format!(
            "Weather anomalies have been detected, including {}.",
            first.to_lowercase()
        ));
    }

    parts.push(CLOSING_SENTENCE.to_string());
    parts.join(" ")
}
