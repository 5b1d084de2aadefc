//! Extreme weather event detection over historical windows.
//!
//! Scans the daily record for heat waves, cold snaps, heavy rainfall days
//! and extended droughts. Run-based events require consecutive calendar
//! dates; a gap in the record breaks the run.

use chrono::{Datelike, Duration, NaiveDate};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::data::{DailyRecord, WeatherSeries};

/// Daily maximum above this can contribute to a heat wave.
const HEAT_WAVE_TEMP: f64 = 35.0;
/// Minimum consecutive days for a heat wave.
const HEAT_WAVE_MIN_DAYS: usize = 3;
/// Daily minimum below this can contribute to a cold snap.
const COLD_SNAP_TEMP: f64 = -5.0;
/// Minimum consecutive days for a cold snap.
const COLD_SNAP_MIN_DAYS: usize = 2;
/// Single-day rainfall above this is reported on its own.
const HEAVY_RAIN_MM: f64 = 30.0;
/// Daily rainfall below this counts as dry for drought detection.
const DRY_DAY_RAIN_MM: f64 = 1.0;
/// Consecutive dry days required before a drought event is reported.
const DROUGHT_RUN_DAYS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtremeEventKind {
    HeatWave,
    ColdSnap,
    HeavyRainfall,
    Drought,
}

impl ExtremeEventKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ExtremeEventKind::HeatWave => "Heat Wave",
            ExtremeEventKind::ColdSnap => "Cold Snap",
            ExtremeEventKind::HeavyRainfall => "Heavy Rainfall",
            ExtremeEventKind::Drought => "Drought",
        }
    }
}

/// One detected event. `peak` is the most extreme reading of the run
/// (highest temperature, lowest temperature or rainfall total depending
/// on the kind; drought events carry the run length instead).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeEvent {
    pub kind: ExtremeEventKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: usize,
    pub peak: f64,
    pub description: String,
}

/// Scans the series and returns all detected events sorted by start date.
pub fn identify_extreme_events(series: &WeatherSeries) -> Vec<ExtremeEvent> {
    let records = series.records();
    let mut events = Vec::new();

    collect_runs(
        records,
        |r| r.temp_max > HEAT_WAVE_TEMP,
        HEAT_WAVE_MIN_DAYS,
        &mut events,
        |run| {
            let peak = run.iter().map(|r| r.temp_max).fold(f64::NEG_INFINITY, f64::max);
            let description =
                format!("Heat wave with temperatures up to {peak:.1}°C for {} days", run.len());
            (ExtremeEventKind::HeatWave, peak, description)
        },
    );

    for record in records {
        if record.rain_sum > HEAVY_RAIN_MM {
            events.push(ExtremeEvent {
                kind: ExtremeEventKind::HeavyRainfall,
                start: record.date,
                end: record.date,
                duration_days: 1,
                peak: record.rain_sum,
                description: format!("Heavy rainfall of {:.1}mm", record.rain_sum),
            });
        }
    }

    collect_runs(
        records,
        |r| r.temp_min < COLD_SNAP_TEMP,
        COLD_SNAP_MIN_DAYS,
        &mut events,
        |run| {
            let peak = run.iter().map(|r| r.temp_min).fold(f64::INFINITY, f64::min);
            let description =
                format!("Cold snap with temperatures down to {peak:.1}°C for {} days", run.len());
            (ExtremeEventKind::ColdSnap, peak, description)
        },
    );

    collect_droughts(records, &mut events);

    events.sort_by_key(|e| e.start);
    events
}

/// Finds maximal runs of consecutive dates matching `predicate` and reports
/// each run of at least `min_days` through `describe`.
fn collect_runs<P, D>(
    records: &[DailyRecord],
    predicate: P,
    min_days: usize,
    events: &mut Vec<ExtremeEvent>,
    describe: D,
) where
    P: Fn(&DailyRecord) -> bool,
    D: Fn(&[DailyRecord]) -> (ExtremeEventKind, f64, String),
{
    let mut run: Vec<DailyRecord> = Vec::new();
    let mut flush = |run: &mut Vec<DailyRecord>, events: &mut Vec<ExtremeEvent>| {
        if run.len() >= min_days {
            let (kind, peak, description) = describe(run);
            events.push(ExtremeEvent {
                kind,
                start: run[0].date,
                end: run[run.len() - 1].date,
                duration_days: run.len(),
                peak,
                description,
            });
        }
        run.clear();
    };

    for record in records {
        let continues = run
            .last()
            .map(|prev| record.date - prev.date == Duration::days(1))
            .unwrap_or(true);
        if !predicate(record) || !continues {
            flush(&mut run, events);
        }
        if predicate(record) {
            run.push(record.clone());
        }
    }
    flush(&mut run, events);
}

/// Reports a drought once a trailing window of 15 consecutive dates is
/// entirely dry, at most once per calendar month. The event is dated back
/// from the day the window completes.
fn collect_droughts(records: &[DailyRecord], events: &mut Vec<ExtremeEvent>) {
    let mut seen_months: FxHashSet<(i32, u32)> = FxHashSet::default();
    let mut dry_run = 0usize;
    let mut prev_date: Option<NaiveDate> = None;

    for record in records {
        let continues = prev_date
            .map(|prev| record.date - prev == Duration::days(1))
            .unwrap_or(true);
        if record.rain_sum < DRY_DAY_RAIN_MM {
            dry_run = if continues { dry_run + 1 } else { 1 };
        } else {
            dry_run = 0;
        }
        prev_date = Some(record.date);

        if dry_run >= DROUGHT_RUN_DAYS
            && seen_months.insert((record.date.year(), record.date.month()))
        {
            events.push(ExtremeEvent {
                kind: ExtremeEventKind::Drought,
                start: record.date - Duration::days(DROUGHT_RUN_DAYS as i64),
                end: record.date,
                duration_days: DROUGHT_RUN_DAYS,
                peak: DROUGHT_RUN_DAYS as f64,
                description: format!(
                    "Drought period of {DROUGHT_RUN_DAYS}+ days without significant rainfall"
                ),
            });
        }
    }
}
