//! Seeded synthetic weather generation.
//!
//! Stand-in data for development and for regions where the fetch
//! collaborator has no coverage. Values follow simple latitude and season
//! dependent bands rather than any physical model. The same seed and
//! inputs always produce the same series.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::{DailyRecord, ForecastPoint, ForecastSeries, WeatherSeries};
use crate::season::Hemisphere;

/// Forecast points per generated window, 3-hourly over 5 days.
const FORECAST_POINTS: usize = 40;
/// Baseline daily rain probability before seasonal adjustment.
const RAIN_CHANCE_BASE: f64 = 0.3;

/// Coarse month buckets used only by the generator. These deliberately
/// differ from the meteorological seasons: the warm band is stretched to
/// May through September so generated summers read hot for longer.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Summer,
    Winter,
    Spring,
    Fall,
}

fn month_phase(month: u32, hemisphere: Hemisphere) -> Phase {
    match hemisphere {
        Hemisphere::Northern => {
            if (5..=9).contains(&month) {
                Phase::Summer
            } else if month <= 2 || month == 12 {
                Phase::Winter
            } else if (3..=4).contains(&month) {
                Phase::Spring
            } else {
                Phase::Fall
            }
        }
        Hemisphere::Southern => {
            if month >= 11 || month <= 3 {
                Phase::Summer
            } else if (5..=9).contains(&month) {
                Phase::Winter
            } else if (10..=11).contains(&month) {
                Phase::Spring
            } else {
                Phase::Fall
            }
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generates one daily record per date in `start..=end`.
pub fn generate_historical(
    latitude: f64,
    start: NaiveDate,
    end: NaiveDate,
    seed: u64,
) -> WeatherSeries {
    let hemisphere = Hemisphere::from_latitude(latitude);
    let lat_scale = (90.0 - latitude.abs()) / 90.0;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut records = Vec::new();
    let mut date = start;
    while date <= end {
        let phase = month_phase(date.month(), hemisphere);

        let base_temp = match phase {
            Phase::Summer => rng.gen_range(20.0..35.0),
            Phase::Winter => rng.gen_range(-5.0..15.0),
            Phase::Spring => rng.gen_range(10.0..25.0),
            Phase::Fall => rng.gen_range(5.0..20.0),
        } * lat_scale;

        let temp_min = base_temp - rng.gen_range(3.0..8.0);
        let temp_max = base_temp + rng.gen_range(3.0..8.0);

        let rain_chance = match phase {
            Phase::Spring | Phase::Fall => RAIN_CHANCE_BASE * 1.5,
            Phase::Winter => RAIN_CHANCE_BASE,
            Phase::Summer => RAIN_CHANCE_BASE * 0.7,
        };
        let mut rain =
            if rng.gen::<f64>() < rain_chance { rng.gen_range(0.5..30.0) } else { 0.0 };

        // Cold winter days turn part of the rain into snow.
        let mut snow = 0.0;
        if phase == Phase::Winter && temp_min < 2.0 && rain > 0.0 {
            let snow_ratio = ((2.0 - temp_min) / 4.0).clamp(0.0, 1.0);
            snow = rain * snow_ratio;
            rain *= 1.0 - snow_ratio;
        }

        records.push(DailyRecord {
            date,
            temp_min: round1(temp_min),
            temp_max: round1(temp_max),
            temp_avg: round1((temp_min + temp_max) / 2.0),
            humidity_avg: rng.gen_range(30..=95) as f64,
            rain_sum: round1(rain),
            snow_sum: round1(snow),
            wind_speed: rng.gen_range(1.0..15.0),
            clouds: rng.gen_range(0..=100) as f64,
        });
        date += Duration::days(1);
    }

    WeatherSeries::from_records(records)
}

/// Generates a 3-hourly forecast window of 40 points starting at `start`.
/// Temperatures follow a sine day cycle around 20°C with jitter; rain is
/// most likely near 15°C and turns to snow below 2°C.
pub fn generate_forecast(latitude: f64, start: NaiveDateTime, seed: u64) -> ForecastSeries {
    let lat_scale = (90.0 - latitude.abs()) / 90.0;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut points = Vec::with_capacity(FORECAST_POINTS);
    for i in 0..FORECAST_POINTS {
        let timestamp = start + Duration::hours(3 * i as i64);

        let day_cycle = 20.0 + 5.0 * (2.0 * std::f64::consts::PI * i as f64 / 8.0).sin();
        let temp = day_cycle * lat_scale + rng.gen_range(-3.0..3.0);

        let rain_chance = RAIN_CHANCE_BASE - (temp - 15.0).abs() / 30.0;
        let mut rain = if rng.gen::<f64>() < rain_chance { rng.gen_range(0.0..15.0) } else { 0.0 };
        let mut snow = 0.0;
        if temp < 2.0 && rain > 0.0 {
            snow = rain;
            rain = 0.0;
        }

        points.push(ForecastPoint {
            timestamp,
            temp: round1(temp),
            humidity: rng.gen_range(30..=95) as f64,
            rain: round1(rain),
            snow: round1(snow),
            wind_speed: rng.gen_range(1.0..10.0),
            clouds: rng.gen_range(0..=100) as f64,
        });
    }

    ForecastSeries::from_points(points)
}
