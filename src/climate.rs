//! Climate indicator extraction.
//!
//! Reduces a historical window to the scalar bundle the crop scorer and
//! advisory layers consume, plus a richer agronomic breakdown (growing
//! degree days, dry spells, seasonal aggregates). An empty window falls back
//! to the documented default bundle so callers treat it as insufficient
//! data rather than an error.

use serde::Serialize;
use tracing::debug;

use crate::data::WeatherSeries;
use crate::season::{Hemisphere, Season};
use crate::utils::stats;

/// Days below 0°C tolerated before the window is flagged frost-prone.
const FROST_DAY_LIMIT: usize = 5;
/// Daily rainfall below this many millimetres counts as a dry day.
const DRY_DAY_RAIN_MM: f64 = 1.0;
/// Trailing window length for the drought heuristic.
const DROUGHT_WINDOW_DAYS: usize = 15;
/// Dry days within one window required to flag drought risk.
const DROUGHT_DRY_DAYS: usize = 13;
/// Base temperature for growing degree days.
const GDD_BASE_TEMP: f64 = 10.0;
/// Daily rainfall above this marks a heavy-rain day.
const HEAVY_RAIN_MM: f64 = 20.0;
/// Daily maximum above this marks a heat-stress day.
const HEAT_STRESS_TEMP: f64 = 30.0;

// ============================================================================
// Core indicator bundle
// ============================================================================

/// Scalar climate summary of one historical window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimateIndicators {
    pub avg_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub annual_rainfall: f64,
    pub drought_risk: bool,
    pub frost_risk: bool,
}

impl Default for ClimateIndicators {
    /// Fallback bundle for windows with no usable data.
    fn default() -> Self {
        ClimateIndicators {
            avg_temp: 20.0,
            min_temp: 5.0,
            max_temp: 35.0,
            annual_rainfall: 800.0,
            drought_risk: false,
            frost_risk: false,
        }
    }
}

impl ClimateIndicators {
    pub fn from_series(series: &WeatherSeries) -> Self {
        if series.is_empty() {
            debug!("empty historical window, using default climate indicators");
            return Self::default();
        }

        let records = series.records();
        let avg_temp = stats::mean(&series.column(|r| r.temp_avg));
        let min_temp = records.iter().map(|r| r.temp_min).fold(f64::INFINITY, f64::min);
        let max_temp = records.iter().map(|r| r.temp_max).fold(f64::NEG_INFINITY, f64::max);

        let rain = series.column(|r| r.rain_sum);
        let annual_rainfall = rain.iter().sum();

        let frost_days = records.iter().filter(|r| r.temp_min < 0.0).count();

        ClimateIndicators {
            avg_temp,
            min_temp,
            max_temp,
            annual_rainfall,
            drought_risk: has_drought_window(&rain),
            frost_risk: frost_days > FROST_DAY_LIMIT,
        }
    }
}

/// True when some trailing 15-day window contains at least 13 dry days.
/// Windows are only evaluated once 15 observations are available.
fn has_drought_window(rain: &[f64]) -> bool {
    if rain.len() < DROUGHT_WINDOW_DAYS {
        return false;
    }
    let dry: Vec<bool> = rain.iter().map(|&r| r < DRY_DAY_RAIN_MM).collect();
    let mut dry_count = dry[..DROUGHT_WINDOW_DAYS].iter().filter(|&&d| d).count();
    if dry_count >= DROUGHT_DRY_DAYS {
        return true;
    }
    for i in DROUGHT_WINDOW_DAYS..dry.len() {
        dry_count += dry[i] as usize;
        dry_count -= dry[i - DROUGHT_WINDOW_DAYS] as usize;
        if dry_count >= DROUGHT_DRY_DAYS {
            return true;
        }
    }
    false
}

// ============================================================================
// Extended breakdown
// ============================================================================

/// Per-season aggregate over the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAggregate {
    pub season: Season,
    pub days: usize,
    pub avg_temp: f64,
    pub total_rain: f64,
    pub avg_humidity: f64,
}

/// Agronomic breakdown beyond the core indicator bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClimateBreakdown {
    pub temp_range: f64,
    pub growing_degree_days: f64,
    pub rainy_days: usize,
    pub heavy_rain_days: usize,
    pub frost_days: usize,
    pub heat_stress_days: usize,
    /// Longest contiguous run of dry days. A deliberately different measure
    /// from the rolling drought_risk heuristic: a run breaks on any wet day.
    pub max_dry_spell: usize,
    pub dry_spells_5d_plus: usize,
    pub seasonal: Vec<SeasonalAggregate>,
}

impl ClimateBreakdown {
    pub fn from_series(series: &WeatherSeries, hemisphere: Hemisphere) -> Self {
        if series.is_empty() {
            return Self::default();
        }
        let records = series.records();

        let max_temp = records.iter().map(|r| r.temp_max).fold(f64::NEG_INFINITY, f64::max);
        let min_temp = records.iter().map(|r| r.temp_min).fold(f64::INFINITY, f64::min);

        let growing_degree_days =
            records.iter().map(|r| (r.temp_avg - GDD_BASE_TEMP).max(0.0)).sum();

        let (max_dry_spell, dry_spells_5d_plus) =
            dry_spell_runs(&series.column(|r| r.rain_sum));

        ClimateBreakdown {
            temp_range: max_temp - min_temp,
            growing_degree_days,
            rainy_days: records.iter().filter(|r| r.rain_sum > 0.0).count(),
            heavy_rain_days: records.iter().filter(|r| r.rain_sum > HEAVY_RAIN_MM).count(),
            frost_days: records.iter().filter(|r| r.temp_min < 0.0).count(),
            heat_stress_days: records.iter().filter(|r| r.temp_max > HEAT_STRESS_TEMP).count(),
            max_dry_spell,
            dry_spells_5d_plus,
            seasonal: seasonal_aggregates(series, hemisphere),
        }
    }
}

/// (longest run, number of runs of at least 5 days) of consecutive dry days.
fn dry_spell_runs(rain: &[f64]) -> (usize, usize) {
    let mut longest = 0usize;
    let mut five_plus = 0usize;
    let mut run = 0usize;
    for &r in rain {
        if r < DRY_DAY_RAIN_MM {
            run += 1;
        } else {
            longest = longest.max(run);
            if run >= 5 {
                five_plus += 1;
            }
            run = 0;
        }
    }
    longest = longest.max(run);
    if run >= 5 {
        five_plus += 1;
    }
    (longest, five_plus)
}

/// Season buckets in Winter/Spring/Summer/Fall order, empty seasons omitted.
pub fn seasonal_aggregates(series: &WeatherSeries, hemisphere: Hemisphere) -> Vec<SeasonalAggregate> {
    let mut out = Vec::new();
    for season in Season::ALL {
        let mut temps = Vec::new();
        let mut humidity = Vec::new();
        let mut total_rain = 0.0;
        for record in series.records() {
            if Season::for_date(record.date, hemisphere) == season {
                temps.push(record.temp_avg);
                humidity.push(record.humidity_avg);
                total_rain += record.rain_sum;
            }
        }
        if temps.is_empty() {
            continue;
        }
        out.push(SeasonalAggregate {
            season,
            days: temps.len(),
            avg_temp: stats::mean(&temps),
            total_rain,
            avg_humidity: stats::mean(&humidity),
        });
    }
    out
}
