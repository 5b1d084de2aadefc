//! Crop recommendation from climate indicators.
//!
//! Scores every in-season crop in a [`CropCatalog`] against the observed
//! [`ClimateIndicators`] and returns a ranked shortlist. Temperature carries
//! more weight than rainfall because irrigation can substitute for rain far
//! more readily than heating or cooling can substitute for climate.

pub mod catalog;
pub mod insights;
pub mod scoring;

pub use catalog::{CropCatalog, CropProfile, GrowingSeason};
pub use insights::{get_crop_insights, CropInsight};
pub use scoring::{rainfall_score, temperature_score};

use serde::Serialize;

use crate::climate::ClimateIndicators;
use crate::season::Season;
use scoring::{tolerance_adjusted_scores, weighted_score};

/// Minimum confidence (0-100) for a crop to make the shortlist.
const CONFIDENCE_FLOOR: f64 = 40.0;

/// Maximum number of crops returned.
const MAX_RECOMMENDATIONS: usize = 5;

/// A ranked crop suggestion with its supporting reasons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub crop: String,
    /// Match confidence on a 0-100 scale.
    pub confidence: f64,
    pub reasons: Vec<String>,
    /// Set when no crop reached the confidence floor and this entry is the
    /// best available rather than a genuine match.
    pub experimental: bool,
}

struct Candidate<'a> {
    crop: &'a CropProfile,
    confidence: f64,
    reasons: Vec<String>,
}

/// Rank catalog crops for the given climate and season.
///
/// Crops whose growing season does not include `season` are skipped
/// (perennials always qualify). Up to five crops with confidence of at least
/// 40 are returned, best first; ties keep catalog order. When nothing clears
/// the floor, the single best crop is returned flagged as experimental. An
/// empty result means no crop in the catalog grows in this season.
pub fn recommend_crops(
    catalog: &CropCatalog,
    climate: &ClimateIndicators,
    season: Season,
) -> Vec<Recommendation> {
    let mut candidates: Vec<Candidate> = catalog
        .crops()
        .iter()
        .filter(|crop| crop.growing_season.supports(season))
        .map(|crop| {
            let (temp_score, rain_score) = tolerance_adjusted_scores(climate, crop);
            Candidate {
                crop,
                confidence: weighted_score(temp_score, rain_score) * 100.0,
                reasons: describe_match(climate, crop, temp_score, rain_score),
            }
        })
        .collect();

    // Stable sort: equal confidence resolves to the earlier catalog entry.
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut recommendations: Vec<Recommendation> = candidates
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .filter(|c| c.confidence >= CONFIDENCE_FLOOR)
        .map(|c| Recommendation {
            crop: c.crop.name.clone(),
            confidence: c.confidence,
            reasons: c.reasons.clone(),
            experimental: false,
        })
        .collect();

    if recommendations.is_empty() {
        if let Some(best) = candidates.first() {
            let mut reasons = best.reasons.clone();
            reasons.push("Consider as experimental with proper adaptations.".to_string());
            recommendations.push(Recommendation {
                crop: best.crop.name.clone(),
                confidence: best.confidence,
                reasons,
                experimental: true,
            });
        }
    }

    recommendations
}

/// Reason sentences for a scored crop. Score bands read the
/// tolerance-adjusted scores, so a discount can move a crop down a band.
fn describe_match(
    climate: &ClimateIndicators,
    crop: &CropProfile,
    temp_score: f64,
    rain_score: f64,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if temp_score > 0.8 {
        reasons.push(format!(
            "Temperature range ({:.1}°C to {:.1}°C) is ideal",
            climate.min_temp, climate.max_temp
        ));
    } else if temp_score > 0.6 {
        reasons.push("Temperature range is suitable".to_string());
    } else if temp_score > 0.4 {
        reasons.push("Temperature range is acceptable but not optimal".to_string());
    } else {
        reasons.push("Temperature range may be challenging".to_string());
    }

    if rain_score > 0.8 {
        reasons.push("Precipitation levels are ideal".to_string());
    } else if rain_score > 0.6 {
        reasons.push("Precipitation levels are suitable".to_string());
    } else if rain_score > 0.4 {
        reasons.push("Precipitation levels are acceptable with proper irrigation".to_string());
    } else {
        reasons.push("Irrigation will be necessary".to_string());
    }

    if climate.drought_risk {
        if crop.drought_tolerant {
            reasons.push("Drought tolerance is advantageous in this climate".to_string());
        } else {
            reasons.push("Drought risk requires careful water management".to_string());
        }
    }

    if climate.frost_risk {
        if crop.frost_tolerant {
            reasons.push("Frost tolerance is beneficial in this climate".to_string());
        } else {
            reasons.push("Frost protection measures may be needed".to_string());
        }
    }

    reasons
}
