//! Crop-to-climate match scoring.
//!
//! Both scorers return values in (0, 1]. Scores never reach zero: irrigation,
//! drainage, and season extension can make a marginal site workable, so a
//! hard zero would overstate the mismatch.

use crate::climate::ClimateIndicators;
use crate::recommender::catalog::CropProfile;

/// Distance from optimal temperature (°C) at which the optimality term
/// bottoms out.
const OPTIMAL_TEMP_SPAN: f64 = 15.0;

/// How well the observed temperature range fits a crop, in [0.1, 1.0].
pub fn temperature_score(climate: &ClimateIndicators, crop: &CropProfile) -> f64 {
    if climate.max_temp < crop.min_temp || climate.min_temp > crop.max_temp {
        return 0.1;
    }

    let optimal_score =
        1.0 - ((climate.avg_temp - crop.optimal_temp).abs() / OPTIMAL_TEMP_SPAN).min(1.0);

    let mut range_penalty = 0.0;
    if climate.min_temp < crop.min_temp {
        range_penalty += 0.3 * (crop.min_temp - climate.min_temp) / crop.min_temp;
    }
    if climate.max_temp > crop.max_temp {
        range_penalty += 0.3 * (climate.max_temp - crop.max_temp) / crop.max_temp;
    }

    let score = optimal_score * (1.0 - range_penalty);
    score.clamp(0.1, 1.0)
}

/// How well observed annual rainfall fits a crop, in [0.3, 1.0] below the
/// band and (0.4, 1.0] elsewhere. Within the band the score runs 0.8 to 1.0,
/// peaking at the midpoint.
pub fn rainfall_score(annual_rainfall: f64, crop: &CropProfile) -> f64 {
    if annual_rainfall < crop.min_rainfall * 0.5 {
        return 0.3;
    }
    if annual_rainfall > crop.max_rainfall * 1.5 {
        return 0.4;
    }

    if annual_rainfall >= crop.min_rainfall && annual_rainfall <= crop.max_rainfall {
        let range_size = crop.max_rainfall - crop.min_rainfall;
        let position = if range_size > 0.0 {
            (annual_rainfall - crop.min_rainfall) / range_size
        } else {
            0.5
        };
        let position_score = 1.0 - (0.5 - position).abs();
        return 0.8 + position_score * 0.2;
    }

    if annual_rainfall < crop.min_rainfall {
        let shortfall_ratio = annual_rainfall / crop.min_rainfall;
        0.4 + shortfall_ratio * 0.4
    } else {
        let excess_ratio = (crop.max_rainfall / annual_rainfall).min(1.0);
        0.4 + excess_ratio * 0.4
    }
}

/// Temperature and rainfall scores with tolerance discounts applied.
///
/// Drought risk discounts the rainfall score of crops without drought
/// tolerance; frost risk discounts the temperature score of crops without
/// frost tolerance.
pub fn tolerance_adjusted_scores(climate: &ClimateIndicators, crop: &CropProfile) -> (f64, f64) {
    let mut temp = temperature_score(climate, crop);
    let mut rain = rainfall_score(climate.annual_rainfall, crop);

    if climate.drought_risk && !crop.drought_tolerant {
        rain *= 0.7;
    }
    if climate.frost_risk && !crop.frost_tolerant {
        temp *= 0.8;
    }
    (temp, rain)
}

/// Combined suitability in [0, 1]: temperature weighted 0.6, rainfall 0.4.
pub fn weighted_score(temp_score: f64, rain_score: f64) -> f64 {
    temp_score * 0.6 + rain_score * 0.4
}
