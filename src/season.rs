//! Season and hemisphere resolution.
//!
//! Seasons follow the meteorological convention (December through February is
//! winter in the north) and flip for the southern hemisphere. Callers pass
//! the resolved [`Season`] into the recommender and advisory layers; nothing
//! in the crate reads the wall clock.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// Negative latitudes are southern; the equator resolves north.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::Southern
        } else {
            Hemisphere::Northern
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Meteorological season for a calendar month (1-12), hemisphere-aware.
    pub fn for_month(month: u32, hemisphere: Hemisphere) -> Season {
        let northern = match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        };
        match hemisphere {
            Hemisphere::Northern => northern,
            Hemisphere::Southern => northern.opposite(),
        }
    }

    pub fn for_date(date: NaiveDate, hemisphere: Hemisphere) -> Season {
        Season::for_month(date.month(), hemisphere)
    }

    pub fn opposite(self) -> Season {
        match self {
            Season::Winter => Season::Summer,
            Season::Spring => Season::Fall,
            Season::Summer => Season::Winter,
            Season::Fall => Season::Spring,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

/// Approximate growing-season window (start month, end month) for a
/// latitude, from tropical year-round bands out to subarctic June-August.
/// Southern windows wrap the year end, e.g. (10, 4) for temperate latitudes.
pub fn growing_window(latitude: f64) -> (u32, u32) {
    let abs_lat = latitude.abs();
    match Hemisphere::from_latitude(latitude) {
        Hemisphere::Northern => {
            if abs_lat < 23.5 {
                (1, 12)
            } else if abs_lat < 35.0 {
                (3, 11)
            } else if abs_lat < 45.0 {
                (4, 10)
            } else if abs_lat < 55.0 {
                (5, 9)
            } else {
                (6, 8)
            }
        }
        Hemisphere::Southern => {
            if abs_lat < 23.5 {
                (1, 12)
            } else if abs_lat < 35.0 {
                (9, 5)
            } else if abs_lat < 45.0 {
                (10, 4)
            } else if abs_lat < 55.0 {
                (11, 3)
            } else {
                (12, 2)
            }
        }
    }
}
