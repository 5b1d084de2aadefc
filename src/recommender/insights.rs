//! Per-crop suitability insights.
//!
//! Where [`recommend_crops`](crate::recommender::recommend_crops) answers
//! "what should I plant", insights answer "how would this specific crop fare
//! here": a suitability verdict, a prose summary, and paired lists of
//! climate challenges and management recommendations. Both paths share the
//! same tolerance-adjusted scoring so the numbers agree.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::climate::ClimateIndicators;
use crate::recommender::catalog::{CropCatalog, CropProfile};
use crate::recommender::scoring::{tolerance_adjusted_scores, weighted_score};

/// Suitability assessment for one crop in one climate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropInsight {
    pub suitability: String,
    pub summary: String,
    pub challenges: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Build insights for the named crops. Names missing from the catalog are
/// skipped, so the result can be smaller than the request.
pub fn get_crop_insights(
    catalog: &CropCatalog,
    climate: &ClimateIndicators,
    crop_names: &[&str],
) -> FxHashMap<String, CropInsight> {
    let mut insights = FxHashMap::default();

    for &name in crop_names {
        if let Some(crop) = catalog.get(name) {
            insights.insert(name.to_string(), build_insight(climate, crop));
        }
    }

    insights
}

fn build_insight(climate: &ClimateIndicators, crop: &CropProfile) -> CropInsight {
    let (temp_score, rain_score) = tolerance_adjusted_scores(climate, crop);
    let overall = weighted_score(temp_score, rain_score);

    let suitability = if overall > 0.8 {
        "Excellent match for this climate"
    } else if overall > 0.6 {
        "Good match with proper management"
    } else if overall > 0.4 {
        "Fair match with adaptations required"
    } else {
        "Challenging match, consider alternatives"
    }
    .to_string();

    let mut summary = format!(
        "Overall climate suitability for {} is {:.0}%.",
        crop.name,
        overall * 100.0
    );

    if temp_score < 0.6 {
        let relation = if climate.avg_temp < crop.optimal_temp {
            "below"
        } else {
            "above"
        };
        summary.push_str(&format!(
            " The average temperature of {:.1}°C is {} the optimal {}°C for this crop.",
            climate.avg_temp, relation, crop.optimal_temp
        ));
    }

    if rain_score < 0.6 {
        if climate.annual_rainfall < crop.min_rainfall {
            summary.push_str(&format!(
                " Annual rainfall of {:.0}mm is below the minimum {}mm needed.",
                climate.annual_rainfall, crop.min_rainfall
            ));
        } else if climate.annual_rainfall > crop.max_rainfall {
            summary.push_str(&format!(
                " Annual rainfall of {:.0}mm exceeds the maximum {}mm recommended.",
                climate.annual_rainfall, crop.max_rainfall
            ));
        }
    }

    CropInsight {
        suitability,
        summary,
        challenges: list_challenges(climate, crop),
        recommendations: list_recommendations(climate, crop),
    }
}

fn list_challenges(climate: &ClimateIndicators, crop: &CropProfile) -> Vec<String> {
    let mut challenges = Vec::new();

    if climate.min_temp < crop.min_temp {
        challenges.push(format!(
            "Minimum temperatures of {:.1}°C may be too cold (crop minimum: {}°C)",
            climate.min_temp, crop.min_temp
        ));
    }

    if climate.max_temp > crop.max_temp {
        challenges.push(format!(
            "Maximum temperatures of {:.1}°C may cause heat stress (crop maximum: {}°C)",
            climate.max_temp, crop.max_temp
        ));
    }

    if climate.annual_rainfall < crop.min_rainfall {
        challenges.push(format!(
            "Insufficient natural rainfall ({:.0}mm vs. needed {}mm)",
            climate.annual_rainfall, crop.min_rainfall
        ));
    }

    if climate.annual_rainfall > crop.max_rainfall {
        challenges.push(format!(
            "Excessive rainfall may increase disease pressure ({:.0}mm vs. optimal maximum {}mm)",
            climate.annual_rainfall, crop.max_rainfall
        ));
    }

    if climate.drought_risk && !crop.drought_tolerant {
        challenges.push(
            "Drought periods may affect crop development as this variety has low drought tolerance"
                .to_string(),
        );
    }

    if climate.frost_risk && !crop.frost_tolerant {
        challenges
            .push("Frost risk may damage crops as this variety has low frost tolerance".to_string());
    }

    if challenges.is_empty() {
        challenges.push("No major climate challenges identified for this crop".to_string());
    }

    challenges
}

fn list_recommendations(climate: &ClimateIndicators, crop: &CropProfile) -> Vec<String> {
    let mut recommendations = Vec::new();

    if climate.min_temp < crop.min_temp {
        recommendations.push("Consider using row covers or high tunnels for cold protection".to_string());
        recommendations.push("Plant after risk of frost has passed".to_string());
    }

    if climate.max_temp > crop.max_temp {
        recommendations.push("Use shade cloth during peak heat periods".to_string());
        recommendations.push("Plant early to avoid peak summer heat for maturation".to_string());
    }

    if climate.annual_rainfall < crop.min_rainfall {
        recommendations.push("Implement efficient irrigation systems".to_string());
        recommendations.push("Use mulch to conserve soil moisture".to_string());
    }

    if climate.annual_rainfall > crop.max_rainfall {
        recommendations.push("Ensure good drainage to prevent waterlogging".to_string());
        recommendations.push("Consider raised beds to improve drainage".to_string());
        recommendations.push("Implement disease monitoring and prevention strategies".to_string());
    }

    if climate.drought_risk && !crop.drought_tolerant {
        recommendations.push("Develop a drought contingency irrigation plan".to_string());
        recommendations.push("Consider drought-resistant varieties or alternative crops".to_string());
    }

    if climate.frost_risk && !crop.frost_tolerant {
        recommendations.push("Have frost protection measures ready (covers, sprinklers)".to_string());
        recommendations.push("Monitor weather forecasts closely during frost-risk periods".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Follow standard agricultural practices for this crop".to_string());
        recommendations.push("Monitor for pests and diseases common to this crop".to_string());
    }

    recommendations
}
