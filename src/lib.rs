//! Farm weather advisory core.
//!
//! Turns historical and forecast weather for a growing site into decision
//! support: anomaly detection, weather pattern clustering, trend analysis,
//! crop recommendations, and season-specific work plans.
//!
//! - `data`: daily and 3-hourly observation series
//! - `season`: hemisphere-aware season resolution
//! - `climate`: climate indicators and seasonal breakdowns
//! - `analysis/`: features, models, and the analysis report pipeline
//! - `recommender/`: crop catalog, match scoring, and insights
//! - `advisory/`: seasonal work plans
//! - `alerts`: forecast-driven weather alerts
//! - `extremes`: historical extreme event scanning
//! - `synthetic`: seeded sample-data generators
//! - `utils/`: shared statistics helpers

pub mod advisory;
pub mod alerts;
pub mod analysis;
pub mod climate;
pub mod data;
pub mod extremes;
pub mod recommender;
pub mod season;
pub mod synthetic;
pub mod utils;

// Re-export commonly used types
pub use advisory::{seasonal_recommendations, MonthlyTasks, SeasonalAdvisory};
pub use alerts::{generate_alerts, AlertSeverity, WeatherAlert};
pub use analysis::{AnalysisReport, WeatherAnalyzer};
pub use climate::{ClimateBreakdown, ClimateIndicators};
pub use data::{DailyRecord, ForecastPoint, ForecastSeries, WeatherSeries};
pub use extremes::{identify_extreme_events, ExtremeEvent, ExtremeEventKind};
pub use recommender::{
    get_crop_insights, recommend_crops, CropCatalog, CropInsight, CropProfile, Recommendation,
};
pub use season::{growing_window, Hemisphere, Season};
