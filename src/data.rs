//! Weather record ingestion.
//!
//! The external fetch layer hands over JSON-shaped observations in which any
//! numeric field may be absent. Ingestion resolves those options exactly
//! once: missing values default to 0.0, duplicate dates keep the first
//! occurrence, and records are sorted ascending by date. Every downstream
//! module consumes the dense [`DailyRecord`] / [`ForecastPoint`] shapes and
//! never re-checks field presence.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ============================================================================
// Historical records
// ============================================================================

/// One calendar day of aggregated observations, fully resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_avg: f64,
    pub humidity_avg: f64,
    pub rain_sum: f64,
    pub snow_sum: f64,
    pub wind_speed: f64,
    pub clouds: f64,
}

/// Raw daily observation as produced by the fetch collaborator. Absent
/// fields resolve to 0.0 during ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyObservation {
    pub date: NaiveDate,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_avg: Option<f64>,
    pub humidity_avg: Option<f64>,
    pub rain_sum: Option<f64>,
    pub snow_sum: Option<f64>,
    pub wind_speed: Option<f64>,
    pub clouds: Option<f64>,
}

impl RawDailyObservation {
    fn resolve(self) -> DailyRecord {
        DailyRecord {
            date: self.date,
            temp_min: self.temp_min.unwrap_or(0.0),
            temp_max: self.temp_max.unwrap_or(0.0),
            temp_avg: self.temp_avg.unwrap_or(0.0),
            humidity_avg: self.humidity_avg.unwrap_or(0.0),
            rain_sum: self.rain_sum.unwrap_or(0.0),
            snow_sum: self.snow_sum.unwrap_or(0.0),
            wind_speed: self.wind_speed.unwrap_or(0.0),
            clouds: self.clouds.unwrap_or(0.0),
        }
    }
}

/// An analysis window of daily records, deduplicated and date-sorted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherSeries {
    records: Vec<DailyRecord>,
}

impl WeatherSeries {
    pub fn from_raw(raw: Vec<RawDailyObservation>) -> Self {
        Self::from_records(raw.into_iter().map(RawDailyObservation::resolve).collect())
    }

    /// Normalizes already-resolved records: stable sort by date, then keep
    /// the first record of each date.
    pub fn from_records(mut records: Vec<DailyRecord>) -> Self {
        let before = records.len();
        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);
        let dropped = before - records.len();
        if dropped > 0 {
            warn!(dropped, "duplicate dates in historical data, keeping first occurrence of each");
        }
        WeatherSeries { records }
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extracts one field across the window, in date order.
    pub fn column(&self, field: impl Fn(&DailyRecord) -> f64) -> Vec<f64> {
        self.records.iter().map(field).collect()
    }
}

// ============================================================================
// Forecast points
// ============================================================================

/// One sub-daily forecast step (3-hour granularity upstream), resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub temp: f64,
    pub humidity: f64,
    pub rain: f64,
    pub snow: f64,
    pub wind_speed: f64,
    pub clouds: f64,
}

/// Raw forecast entry with an epoch-seconds timestamp, as delivered by the
/// fetch collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastEntry {
    pub timestamp: i64,
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub rain: Option<f64>,
    pub snow: Option<f64>,
    pub wind_speed: Option<f64>,
    pub clouds: Option<f64>,
}

impl RawForecastEntry {
    fn resolve(self) -> Option<ForecastPoint> {
        let timestamp = DateTime::from_timestamp(self.timestamp, 0)?.naive_utc();
        Some(ForecastPoint {
            timestamp,
            temp: self.temp.unwrap_or(0.0),
            humidity: self.humidity.unwrap_or(0.0),
            rain: self.rain.unwrap_or(0.0),
            snow: self.snow.unwrap_or(0.0),
            wind_speed: self.wind_speed.unwrap_or(0.0),
            clouds: self.clouds.unwrap_or(0.0),
        })
    }
}

/// A short-horizon forecast window, sorted by timestamp.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn from_raw(raw: Vec<RawForecastEntry>) -> Self {
        let before = raw.len();
        let points: Vec<ForecastPoint> =
            raw.into_iter().filter_map(RawForecastEntry::resolve).collect();
        let dropped = before - points.len();
        if dropped > 0 {
            warn!(dropped, "forecast entries with unrepresentable timestamps were discarded");
        }
        Self::from_points(points)
    }

    pub fn from_points(mut points: Vec<ForecastPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        ForecastSeries { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn column(&self, field: impl Fn(&ForecastPoint) -> f64) -> Vec<f64> {
        self.points.iter().map(field).collect()
    }

    /// Number of distinct calendar dates covered by the forecast.
    pub fn distinct_days(&self) -> usize {
        let mut days: Vec<NaiveDate> = self.points.iter().map(|p| p.timestamp.date()).collect();
        days.dedup();
        days.len()
    }
}
