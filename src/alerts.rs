//! Forecast-driven agricultural weather alerts.
//!
//! Each alert pairs a detection rule over the forecast window with fixed
//! guidance text for growers. Rules are independent; one window can raise
//! several alerts at once.

use serde::Serialize;

use crate::data::{ForecastPoint, ForecastSeries};

/// Forecast temperature above this raises a heat warning.
const HEAT_ALERT_TEMP: f64 = 35.0;
/// Forecast temperature below this raises a frost warning.
const FROST_ALERT_TEMP: f64 = 0.0;
/// Rainfall in one 3-hour step above this raises a heavy rain alert.
const HEAVY_RAIN_3H_MM: f64 = 25.0;
/// Window rainfall total above this raises a cumulative rainfall alert.
const CUMULATIVE_RAIN_MM: f64 = 50.0;
/// Wind speed above this raises a strong wind warning.
const STRONG_WIND_MS: f64 = 10.0;
/// Window rainfall total below this can raise a dry conditions alert.
const DRY_TOTAL_MM: f64 = 5.0;
/// Dry conditions need a full 5-day window before they are alertable.
const DRY_ALERT_MIN_POINTS: usize = 40;

const TIME_FORMAT: &str = "%a %b %d, %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AlertSeverity {
    Mild,
    Moderate,
    Severe,
}

impl AlertSeverity {
    pub fn display_name(&self) -> &'static str {
        match self {
            AlertSeverity::Mild => "Mild",
            AlertSeverity::Moderate => "Moderate",
            AlertSeverity::Severe => "Severe",
        }
    }
}

/// One alert with grower-facing guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub title: &'static str,
    pub severity: AlertSeverity,
    pub time_range: String,
    pub description: String,
    pub agricultural_impact: &'static str,
    pub recommended_action: &'static str,
}

/// Evaluates all alert rules against the forecast window. An empty window
/// raises nothing.
pub fn generate_alerts(series: &ForecastSeries) -> Vec<WeatherAlert> {
    if series.is_empty() {
        return Vec::new();
    }
    let points = series.points();
    let mut alerts = Vec::new();

    let max_temp = points.iter().map(|p| p.temp).fold(f64::NEG_INFINITY, f64::max);
    let min_temp = points.iter().map(|p| p.temp).fold(f64::INFINITY, f64::min);
    let max_rain_3h = points.iter().map(|p| p.rain).fold(f64::NEG_INFINITY, f64::max);
    let total_rain: f64 = points.iter().map(|p| p.rain).sum();
    let max_wind = points.iter().map(|p| p.wind_speed).fold(f64::NEG_INFINITY, f64::max);
    let window_days = points.len() / 8;

    if max_temp > HEAT_ALERT_TEMP {
        if let Some(time_range) = span_of(series, |p| p.temp > HEAT_ALERT_TEMP) {
            alerts.push(WeatherAlert {
                title: "Extreme Heat Warning",
                severity: AlertSeverity::Severe,
                time_range,
                description: format!(
                    "Temperatures are expected to exceed 35°C, with a maximum of {max_temp:.1}°C."
                ),
                agricultural_impact: "High temperatures can cause crop stress, increased water \
                     needs, and may lead to heat damage. Flowering crops are particularly \
                     vulnerable.",
                recommended_action: "Increase irrigation frequency, consider temporary shade for \
                     sensitive crops, and avoid midday field operations.",
            });
        }
    }

    if min_temp < FROST_ALERT_TEMP {
        if let Some(time_range) = span_of(series, |p| p.temp < FROST_ALERT_TEMP) {
            alerts.push(WeatherAlert {
                title: "Frost Warning",
                severity: AlertSeverity::Severe,
                time_range,
                description: format!(
                    "Temperatures are expected to drop below freezing, with a minimum of \
                     {min_temp:.1}°C."
                ),
                agricultural_impact: "Frost can damage or kill crops, especially vulnerable \
                     seedlings and flowering plants.",
                recommended_action: "Cover sensitive crops, use frost protection methods, and \
                     delay planting of new seedlings.",
            });
        }
    }

    if max_rain_3h > HEAVY_RAIN_3H_MM {
        if let Some(first) = points.iter().find(|p| p.rain > HEAVY_RAIN_3H_MM) {
            alerts.push(WeatherAlert {
                title: "Heavy Rain Alert",
                severity: AlertSeverity::Moderate,
                time_range: format!("{} onwards", first.timestamp.format(TIME_FORMAT)),
                description: format!(
                    "Heavy rainfall expected with up to {max_rain_3h:.1}mm in a 3-hour period."
                ),
                agricultural_impact: "Heavy rain may cause soil erosion, waterlogging, and \
                     increase disease pressure in crops.",
                recommended_action: "Check drainage systems, secure young plants, and consider \
                     delaying pesticide application.",
            });
        }
    }

    if total_rain > CUMULATIVE_RAIN_MM {
        alerts.push(WeatherAlert {
            title: "High Cumulative Rainfall",
            severity: AlertSeverity::Moderate,
            time_range: format!("Next {window_days} days"),
            description: format!(
                "Total expected rainfall of {total_rain:.1}mm over the forecast period."
            ),
            agricultural_impact: "Persistent wet conditions increase disease risk and may delay \
                 field operations.",
            recommended_action: "Monitor low-lying areas for flooding, check crop health for \
                 signs of disease, and plan field operations accordingly.",
        });
    }

    if max_wind > STRONG_WIND_MS {
        if let Some(time_range) = span_of(series, |p| p.wind_speed > STRONG_WIND_MS) {
            alerts.push(WeatherAlert {
                title: "Strong Wind Warning",
                severity: AlertSeverity::Moderate,
                time_range,
                description: format!(
                    "Strong winds expected with speeds up to {max_wind:.1}m/s."
                ),
                agricultural_impact: "Strong winds may damage tall crops, increase water loss \
                     through evaporation, and hamper spraying operations.",
                recommended_action: "Secure agricultural structures, provide windbreaks for \
                     vulnerable crops, and avoid spraying operations during windy periods.",
            });
        }
    }

    if total_rain < DRY_TOTAL_MM && points.len() >= DRY_ALERT_MIN_POINTS {
        alerts.push(WeatherAlert {
            title: "Dry Conditions Alert",
            severity: AlertSeverity::Mild,
            time_range: format!("Next {window_days} days"),
            description: format!(
                "Limited rainfall expected ({total_rain:.1}mm) over the forecast period."
            ),
            agricultural_impact: "Extended dry conditions may lead to soil moisture depletion \
                 and water stress in crops.",
            recommended_action: "Monitor soil moisture levels, prioritize irrigation for \
                 critical growth stages, and consider mulching to conserve soil moisture.",
        });
    }

    alerts
}

/// "first - last" time range over the points matching `predicate`.
fn span_of<P>(series: &ForecastSeries, predicate: P) -> Option<String>
where
    P: Fn(&ForecastPoint) -> bool,
{
    let mut matching = series.points().iter().filter(|p| predicate(p));
    let first = matching.next()?;
    let last = matching.last().unwrap_or(first);
    Some(format!(
        "{} - {}",
        first.timestamp.format(TIME_FORMAT),
        last.timestamp.format(TIME_FORMAT)
    ))
}
