//! Forecast interpretation against historical context.
//!
//! Compares the forecast window with the historical record and emits a
//! one-line comparison plus notable upcoming patterns. Daily rainfall is
//! normalized over distinct forecast days, not raw 3-hour points.

use serde::Serialize;

use crate::data::{ForecastSeries, WeatherSeries};
use crate::utils::stats;

/// Mean temperature difference treated as clearly warmer or cooler.
const STRONG_TEMP_DIFF: f64 = 3.0;
/// Mean temperature difference treated as mildly warmer or cooler.
const MILD_TEMP_DIFF: f64 = 1.0;
/// Forecast highs above this historical quantile are called out.
const WARM_QUANTILE: f64 = 0.9;
/// Forecast lows below this historical quantile are called out.
const COOL_QUANTILE: f64 = 0.1;
/// First-versus-last three point swing worth calling out, °C.
const SWING_FLOOR: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastOutlook {
    pub forecast_analysis: String,
    pub upcoming_patterns: Vec<String>,
}

/// Builds the outlook for one forecast window. An empty window produces a
/// fixed message; an empty historical record skips the comparisons.
pub fn predict_upcoming(historical: &WeatherSeries, forecast: &ForecastSeries) -> ForecastOutlook {
    let mut outlook = ForecastOutlook::default();

    if forecast.is_empty() {
        outlook.forecast_analysis = "No forecast data available for prediction.".to_string();
        return outlook;
    }

    let temps = forecast.column(|p| p.temp);
    let avg_forecast_temp = stats::mean(&temps);
    let max_forecast_temp = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_forecast_temp = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let total_forecast_rain: f64 = forecast.column(|p| p.rain).iter().sum();

    if historical.is_empty() {
        outlook.forecast_analysis = "Unable to compare forecast with historical averages due to \
             insufficient historical data."
            .to_string();
    } else {
        let avg_historical_temp = stats::mean(&historical.column(|r| r.temp_avg));
        let temp_diff = avg_forecast_temp - avg_historical_temp;

        let comparison = if temp_diff > STRONG_TEMP_DIFF {
            "significantly warmer than"
        } else if temp_diff > MILD_TEMP_DIFF {
            "warmer than"
        } else if temp_diff < -STRONG_TEMP_DIFF {
            "significantly cooler than"
        } else if temp_diff < -MILD_TEMP_DIFF {
            "cooler than"
        } else {
            "similar to"
        };
        outlook.forecast_analysis =
            format!("The upcoming period is forecasted to be {comparison} historical averages.");

        let warm_bar = stats::quantile(&historical.column(|r| r.temp_max), WARM_QUANTILE);
        if max_forecast_temp > warm_bar {
            outlook.upcoming_patterns.push(format!(
                "Unusually warm temperatures expected with highs reaching {max_forecast_temp:.1}°C."
            ));
        }

        let cool_bar = stats::quantile(&historical.column(|r| r.temp_min), COOL_QUANTILE);
        if min_forecast_temp < cool_bar {
            outlook.upcoming_patterns.push(format!(
                "Unusually cool temperatures expected with lows reaching {min_forecast_temp:.1}°C."
            ));
        }

        let avg_daily_rain = stats::mean(&historical.column(|r| r.rain_sum));
        let forecast_days = forecast.distinct_days();
        let avg_forecast_daily_rain =
            if forecast_days > 0 { total_forecast_rain / forecast_days as f64 } else { 0.0 };

        if avg_forecast_daily_rain > avg_daily_rain * 2.0 {
            outlook
                .upcoming_patterns
                .push("Higher than average rainfall expected in the upcoming period.".to_string());
        } else if avg_forecast_daily_rain < avg_daily_rain * 0.5 {
            outlook
                .upcoming_patterns
                .push("Drier than average conditions expected in the upcoming period.".to_string());
        }
    }

    outlook.upcoming_patterns.push(format!(
        "Forecast shows average temperatures of {avg_forecast_temp:.1}°C, with a total expected \
         rainfall of {total_forecast_rain:.1}mm."
    ));

    if temps.len() > 5 {
        let early = stats::mean(&temps[..3]);
        let late = stats::mean(&temps[temps.len() - 3..]);
        let swing = late - early;
        if swing.abs() > SWING_FLOOR {
            let direction = if swing > 0.0 { "increasing" } else { "decreasing" };
            outlook.upcoming_patterns.push(format!(
                "Temperatures are expected to be {direction} significantly during the forecast \
                 period."
            ));
        }
    }

    outlook
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DailyRecord, ForecastPoint};
    use chrono::{Duration, NaiveDate};

    fn historical(days: usize, temp: f64, rain: f64) -> WeatherSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        WeatherSeries::from_records(
            (0..days)
                .map(|i| DailyRecord {
                    date: start + Duration::days(i as i64),
                    temp_min: temp - 5.0,
                    temp_max: temp + 5.0,
                    temp_avg: temp,
                    humidity_avg: 60.0,
                    rain_sum: rain,
                    snow_sum: 0.0,
                    wind_speed: 3.0,
                    clouds: 40.0,
                })
                .collect(),
        )
    }

    fn forecast_of(temps_and_rain: &[(f64, f64)]) -> ForecastSeries {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        ForecastSeries::from_points(
            temps_and_rain
                .iter()
                .enumerate()
                .map(|(i, &(temp, rain))| ForecastPoint {
                    timestamp: start + Duration::hours(3 * i as i64),
                    temp,
                    humidity: 60.0,
                    rain,
                    snow: 0.0,
                    wind_speed: 4.0,
                    clouds: 40.0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_forecast() {
        let outlook = predict_upcoming(&historical(30, 15.0, 2.0), &ForecastSeries::default());
        assert_eq!(outlook.forecast_analysis, "No forecast data available for prediction.");
        assert!(outlook.upcoming_patterns.is_empty());
    }

    #[test]
    fn test_empty_historical_skips_comparisons() {
        let points: Vec<(f64, f64)> = (0..6).map(|_| (15.5, 0.5)).collect();
        let outlook = predict_upcoming(&WeatherSeries::default(), &forecast_of(&points));
        assert_eq!(
            outlook.forecast_analysis,
            "Unable to compare forecast with historical averages due to insufficient historical \
             data."
        );
        assert_eq!(
            outlook.upcoming_patterns,
            vec![
                "Forecast shows average temperatures of 15.5°C, with a total expected rainfall \
                 of 3.0mm."
            ]
        );
    }

    #[test]
    fn test_similar_period_reports_only_summary() {
        let points: Vec<(f64, f64)> = (0..6).map(|_| (15.5, 0.5)).collect();
        let outlook = predict_upcoming(&historical(60, 15.0, 2.0), &forecast_of(&points));
        assert_eq!(
            outlook.forecast_analysis,
            "The upcoming period is forecasted to be similar to historical averages."
        );
        assert_eq!(
            outlook.upcoming_patterns,
            vec![
                "Forecast shows average temperatures of 15.5°C, with a total expected rainfall \
                 of 3.0mm."
            ]
        );
    }

    #[test]
    fn test_significantly_warmer_with_unusual_high() {
        let mut points: Vec<(f64, f64)> = (0..16).map(|_| (19.0, 0.25)).collect();
        points[5].0 = 25.0;
        let outlook = predict_upcoming(&historical(60, 15.0, 2.0), &forecast_of(&points));
        assert_eq!(
            outlook.forecast_analysis,
            "The upcoming period is forecasted to be significantly warmer than historical \
             averages."
        );
        assert_eq!(
            outlook.upcoming_patterns,
            vec![
                "Unusually warm temperatures expected with highs reaching 25.0°C.".to_string(),
                "Forecast shows average temperatures of 19.4°C, with a total expected rainfall \
                 of 4.0mm."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_cool_and_dry_forecast() {
        let points: Vec<(f64, f64)> = (0..8).map(|_| (5.0, 0.0)).collect();
        let outlook = predict_upcoming(&historical(60, 15.0, 2.0), &forecast_of(&points));
        assert_eq!(
            outlook.forecast_analysis,
            "The upcoming period is forecasted to be significantly cooler than historical \
             averages."
        );
        assert_eq!(
            outlook.upcoming_patterns,
            vec![
                "Unusually cool temperatures expected with lows reaching 5.0°C.".to_string(),
                "Drier than average conditions expected in the upcoming period.".to_string(),
                "Forecast shows average temperatures of 5.0°C, with a total expected rainfall \
                 of 0.0mm."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_wet_forecast_normalizes_by_distinct_days() {
        // 16 points cover two calendar days; 10mm total is 5mm per day,
        // more than double the 2mm historical mean.
        let points: Vec<(f64, f64)> = (0..16).map(|_| (15.0, 0.625)).collect();
        let outlook = predict_upcoming(&historical(60, 15.0, 2.0), &forecast_of(&points));
        assert!(outlook
            .upcoming_patterns
            .contains(&"Higher than average rainfall expected in the upcoming period.".to_string()));
    }

    #[test]
    fn test_swing_detection() {
        let temps = [10.0, 10.0, 10.0, 13.0, 13.0, 16.0, 16.0, 16.0];
        let points: Vec<(f64, f64)> = temps.iter().map(|&t| (t, 0.5)).collect();
        let outlook = predict_upcoming(&historical(60, 15.0, 2.0), &forecast_of(&points));
        assert_eq!(
            outlook.upcoming_patterns.last().unwrap(),
            "Temperatures are expected to be increasing significantly during the forecast period."
        );
    }
}
