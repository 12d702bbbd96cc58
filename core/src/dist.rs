//! Distribution descriptions for randomized record fields.
//!
//! Each field draw is described by data, not code, so a domain's ranges
//! can be overridden from config without touching the generators.

use crate::rng::SimRng;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut SimRng) -> i64 {
        rng.int_between(self.min, self.max)
    }
}

/// Uniform monetary range, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneyRange {
    pub min: f64,
    pub max: f64,
}

impl MoneyRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        round2(rng.uniform(self.min, self.max))
    }
}

/// Calendar window dates are drawn from: `start` plus 0..=`days` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub days:  i64,
}

impl DateWindow {
    pub fn sample(&self, rng: &mut SimRng) -> NaiveDate {
        self.start + Duration::days(rng.int_between(0, self.days))
    }

    /// Midnight of a sampled day, for paired start/end events.
    pub fn sample_datetime(&self, rng: &mut SimRng) -> NaiveDateTime {
        self.sample(rng).and_hms_opt(0, 0, 0).unwrap_or_default()
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            days:  600,
        }
    }
}

/// Round to 2 decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `YYYY-MM-DD`.
pub fn render_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
