//! Long-run trend estimation over the historical window.
//!
//! Fits per-month slopes for temperature, precipitation and humidity, and
//! compares smoothed recent conditions against the start of the window.
//! Only slopes past their reporting floor are surfaced; everything else is
//! considered noise.

use serde::Serialize;

use crate::data::{DailyRecord, WeatherSeries};
use crate::utils::stats;

/// Records required before any trend is estimated.
const MIN_TREND_RECORDS: usize = 30;
/// Points required per metric before its slope is fitted.
const MIN_METRIC_POINTS: usize = 10;
/// Days per month used to scale daily slopes.
const DAYS_PER_MONTH: f64 = 30.0;
/// Reporting floor for the temperature slope, °C per month.
const TEMP_TREND_FLOOR: f64 = 0.01;
/// Reporting floor for rain and humidity slopes, unit per month.
const WET_TREND_FLOOR: f64 = 0.5;
/// Smoothing window for the recent-versus-early comparison.
const SMOOTHING_WINDOW: usize = 30;
/// Smoothed temperature difference worth mentioning, °C.
const PERIOD_SHIFT_FLOOR: f64 = 1.0;

const INSUFFICIENT_MESSAGE: &str = "Insufficient historical data for detailed trend analysis.";
const NO_TRENDS_MESSAGE: &str = "No significant weather trends detected in the available data.";

/// Per-month slopes that passed their floor, plus readable descriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendFindings {
    pub temperature_trend: Option<f64>,
    pub precipitation_trend: Option<f64>,
    pub humidity_trend: Option<f64>,
    pub descriptions: Vec<String>,
}

/// Estimates trends over the window. Windows under 30 records yield only
/// the insufficient-data message.
pub fn analyze_trends(series: &WeatherSeries) -> TrendFindings {
    let mut result = TrendFindings::default();

    if series.len() < MIN_TREND_RECORDS {
        result.descriptions.push(INSUFFICIENT_MESSAGE.to_string());
        return result;
    }

    let temp_trend = trend_per_month(series, |r| r.temp_avg);
    if temp_trend.abs() > TEMP_TREND_FLOOR {
        let direction = if temp_trend > 0.0 { "increasing" } else { "decreasing" };
        result.temperature_trend = Some(temp_trend);
        result.descriptions.push(format!(
            "Temperature has been {direction} by approximately {:.2}°C per month.",
            temp_trend.abs()
        ));
    }

    let rain_trend = trend_per_month(series, |r| r.rain_sum);
    if rain_trend.abs() > WET_TREND_FLOOR {
        let direction = if rain_trend > 0.0 { "increasing" } else { "decreasing" };
        result.precipitation_trend = Some(rain_trend);
        result.descriptions.push(format!(
            "Precipitation has been {direction} by approximately {:.1}mm per month.",
            rain_trend.abs()
        ));
    }

    let humidity_trend = trend_per_month(series, |r| r.humidity_avg);
    if humidity_trend.abs() > WET_TREND_FLOOR {
        let direction = if humidity_trend > 0.0 { "increasing" } else { "decreasing" };
        result.humidity_trend = Some(humidity_trend);
        result.descriptions.push(format!(
            "Humidity has been {direction} by approximately {:.1}% per month.",
            humidity_trend.abs()
        ));
    }

    if let Some(shift) = smoothed_period_shift(series) {
        if shift.abs() > PERIOD_SHIFT_FLOOR {
            let direction = if shift > 0.0 { "warmer" } else { "cooler" };
            result.descriptions.push(format!(
                "The recent period has been {direction} than earlier periods by {:.1}°C on average.",
                shift.abs()
            ));
        }
    }

    if result.descriptions.is_empty() {
        result.descriptions.push(NO_TRENDS_MESSAGE.to_string());
    }
    result
}

/// Ordinary least squares slope of a metric against days since the window
/// start, scaled to a per-month change. Degenerate fits count as no trend.
fn trend_per_month<F>(series: &WeatherSeries, metric: F) -> f64
where
    F: Fn(&DailyRecord) -> f64,
{
    let records = series.records();
    if records.len() < MIN_METRIC_POINTS {
        return 0.0;
    }
    let start = records[0].date;
    let xs: Vec<f64> = records.iter().map(|r| (r.date - start).num_days() as f64).collect();
    let ys: Vec<f64> = records.iter().map(|r| metric(r)).collect();
    match stats::linear_fit(&xs, &ys) {
        Some((slope, _)) => slope * DAYS_PER_MONTH,
        None => 0.0,
    }
}

/// Difference between the mean of the last and first 30 smoothed
/// temperature values. Smoothing uses complete 30-day windows only.
fn smoothed_period_shift(series: &WeatherSeries) -> Option<f64> {
    let smoothed = stats::rolling_mean(&series.column(|r| r.temp_avg), SMOOTHING_WINDOW);
    if smoothed.is_empty() {
        return None;
    }
    let span = SMOOTHING_WINDOW.min(smoothed.len());
    let early = stats::mean(&smoothed[..span]);
    let recent = stats::mean(&smoothed[smoothed.len() - span..]);
    Some(recent - early)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyRecord;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series_with<F>(days: usize, build: F) -> WeatherSeries
    where
        F: Fn(usize) -> (f64, f64, f64),
    {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        WeatherSeries::from_records(
            (0..days)
                .map(|i| {
                    let (temp, rain, humidity) = build(i);
                    DailyRecord {
                        date: start + chrono::Duration::days(i as i64),
                        temp_min: temp - 5.0,
                        temp_max: temp + 5.0,
                        temp_avg: temp,
                        humidity_avg: humidity,
                        rain_sum: rain,
                        snow_sum: 0.0,
                        wind_speed: 3.0,
                        clouds: 40.0,
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn test_short_window_reports_insufficient_data() {
        let series = series_with(29, |_| (15.0, 2.0, 60.0));
        let findings = analyze_trends(&series);
        assert_eq!(
            findings.descriptions,
            vec!["Insufficient historical data for detailed trend analysis."]
        );
        assert_eq!(findings.temperature_trend, None);
        assert_eq!(findings.precipitation_trend, None);
        assert_eq!(findings.humidity_trend, None);
    }

    #[test]
    fn test_flat_window_reports_no_trends() {
        let series = series_with(60, |_| (15.0, 2.0, 60.0));
        let findings = analyze_trends(&series);
        assert_eq!(
            findings.descriptions,
            vec!["No significant weather trends detected in the available data."]
        );
    }

    #[test]
    fn test_warming_window() {
        // 0.1°C per day is 3°C per month.
        let series = series_with(90, |i| (0.1 * i as f64, 2.0, 60.0));
        let findings = analyze_trends(&series);

        assert_relative_eq!(findings.temperature_trend.unwrap(), 3.0, epsilon = 1e-9);
        assert_eq!(
            findings.descriptions,
            vec![
                "Temperature has been increasing by approximately 3.00°C per month.",
                "The recent period has been warmer than earlier periods by 3.1°C on average.",
            ]
        );
    }

    #[test]
    fn test_drying_window() {
        // Rain falls from 20mm to zero across 60 days; temperature flat.
        let series = series_with(60, |i| (15.0, 20.0 - i as f64 * (20.0 / 59.0), 60.0));
        let findings = analyze_trends(&series);

        assert!(findings.temperature_trend.is_none());
        let rain_trend = findings.precipitation_trend.unwrap();
        assert_relative_eq!(rain_trend, -(20.0 / 59.0) * 30.0, epsilon = 1e-9);
        assert_eq!(
            findings.descriptions,
            vec!["Precipitation has been decreasing by approximately 10.2mm per month."]
        );
    }

    #[test]
    fn test_humidity_trend_floor() {
        // Humidity climbing 30 points over 60 days clears the floor.
        let series = series_with(60, |i| (15.0, 2.0, 40.0 + i as f64 * (30.0 / 59.0)));
        let findings = analyze_trends(&series);
        assert!(findings.humidity_trend.is_some());
        assert_eq!(
            findings.descriptions,
            vec!["Humidity has been increasing by approximately 15.3% per month."]
        );
    }

    #[test]
    fn test_tiny_slope_stays_quiet() {
        // 0.0001°C per day rounds to 0.003 per month, below the floor.
        let series = series_with(60, |i| (15.0 + 0.0001 * i as f64, 2.0, 60.0));
        let findings = analyze_trends(&series);
        assert!(findings.temperature_trend.is_none());
        assert_eq!(
            findings.descriptions,
            vec!["No significant weather trends detected in the available data."]
        );
    }

    #[test]
    fn test_metric_guard_returns_zero_for_few_points() {
        let series = series_with(5, |i| (10.0 + i as f64, 2.0, 60.0));
        assert_eq!(trend_per_month(&series, |r| r.temp_avg), 0.0);
    }
}
