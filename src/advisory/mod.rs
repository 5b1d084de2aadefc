//! Farm advisory composition.
//!
//! Turns analysis results into actionable guidance: the seasonal work plans
//! live here, while the narrative weather summary is assembled by
//! [`WeatherAnalyzer`](crate::analysis::WeatherAnalyzer) as part of its
//! report.

pub mod seasonal;

pub use seasonal::{seasonal_recommendations, MonthlyTasks, SeasonalAdvisory};
