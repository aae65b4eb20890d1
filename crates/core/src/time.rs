//! Time accounting - release years, playtime hours and human-readable durations

use crate::error::TimeError;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 24.0 * MINUTES_PER_HOUR;
const MINUTES_PER_WEEK: f64 = 7.0 * MINUTES_PER_DAY;
/// Average month
const MINUTES_PER_MONTH: f64 = 30.4 * MINUTES_PER_DAY;
const MINUTES_PER_YEAR: f64 = 365.0 * MINUTES_PER_DAY;

static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("valid year regex"));

/// Pull the year out of a store release date.
///
/// Only the 4-digit year matters, so "Sep 14, 2016", "25 Apr, 1991",
/// "Mai 25, 1991" and the day-less "Apr , 2015" all work.
pub fn extract_year(raw: &str) -> Result<i32, TimeError> {
    let year = YEAR_TOKEN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    match year {
        Some(year) => Ok(year),
        None => {
            tracing::debug!("No year in release date {:?}", raw);
            Err(TimeError::InvalidDate)
        }
    }
}

/// Strict MM/DD/YYYY date, as typed into the tracking sheet
pub fn parse_date(raw: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(raw.trim(), "%m/%d/%Y").map_err(|_| TimeError::BadFormat {
        input: raw.to_string(),
    })
}

/// Whole days between two moments
pub fn days_since(past: NaiveDateTime, current: NaiveDateTime) -> i64 {
    (current - past).num_days()
}

/// Whole days from `past` until now (local time)
pub fn days_since_now(past: NaiveDateTime) -> i64 {
    days_since(past, chrono::Local::now().naive_local())
}

/// Playtime minutes as hours rounded to one decimal.
/// None when the game was never played or playtime is unknown.
pub fn hours_played(minutes: Option<f64>) -> Option<f64> {
    minutes
        .filter(|m| *m > 0.0)
        .map(|m| round_tenth(m / MINUTES_PER_HOUR))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DurationUnit {
    pub const ASCENDING: [DurationUnit; 6] = [
        DurationUnit::Minute,
        DurationUnit::Hour,
        DurationUnit::Day,
        DurationUnit::Week,
        DurationUnit::Month,
        DurationUnit::Year,
    ];

    pub fn minutes(self) -> f64 {
        match self {
            DurationUnit::Minute => 1.0,
            DurationUnit::Hour => MINUTES_PER_HOUR,
            DurationUnit::Day => MINUTES_PER_DAY,
            DurationUnit::Week => MINUTES_PER_WEEK,
            DurationUnit::Month => MINUTES_PER_MONTH,
            DurationUnit::Year => MINUTES_PER_YEAR,
        }
    }

    /// How many of this unit make the next one up, for display purposes
    fn rollover(self) -> Option<f64> {
        match self {
            DurationUnit::Minute => Some(60.0),
            DurationUnit::Hour => Some(24.0),
            DurationUnit::Day => Some(7.0),
            DurationUnit::Week => Some(4.0),
            DurationUnit::Month => Some(12.0),
            DurationUnit::Year => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DurationUnit::Minute => "Minute",
            DurationUnit::Hour => "Hour",
            DurationUnit::Day => "Day",
            DurationUnit::Week => "Week",
            DurationUnit::Month => "Month",
            DurationUnit::Year => "Year",
        }
    }
}

/// Amounts of each unit to add together. Absent parts count as zero and
/// negative parts are clamped to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationParts {
    pub minutes: Option<f64>,
    pub hours: Option<f64>,
    pub days: Option<f64>,
    pub weeks: Option<f64>,
    pub months: Option<f64>,
    pub years: Option<f64>,
}

impl DurationParts {
    pub fn minutes(mut self, minutes: f64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn days(mut self, days: f64) -> Self {
        self.days = Some(days);
        self
    }

    pub fn weeks(mut self, weeks: f64) -> Self {
        self.weeks = Some(weeks);
        self
    }

    pub fn months(mut self, months: f64) -> Self {
        self.months = Some(months);
        self
    }

    pub fn years(mut self, years: f64) -> Self {
        self.years = Some(years);
        self
    }

    pub fn total_minutes(&self) -> f64 {
        [
            (self.minutes, DurationUnit::Minute),
            (self.hours, DurationUnit::Hour),
            (self.days, DurationUnit::Day),
            (self.weeks, DurationUnit::Week),
            (self.months, DurationUnit::Month),
            (self.years, DurationUnit::Year),
        ]
        .iter()
        .map(|(amount, unit)| amount.unwrap_or(0.0).max(0.0) * unit.minutes())
        .sum()
    }
}

/// A duration expressed in one unit, e.g. "13.3 Hours"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumanDuration {
    /// Rounded to one decimal
    pub value: f64,
    pub unit: DurationUnit,
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.value == 1.0 { "" } else { "s" };
        write!(f, "{:.1} {}{}", self.value, self.unit.name(), plural)
    }
}

/// Express the sum of `parts` in a single unit.
///
/// Units are tried from minutes upwards; the first one whose whole-number
/// amount stays below the next unit's size wins. A unit only reached through
/// rounding (59.99 minutes, 3.99 weeks) shows as 1.0 of it. Halves round
/// up, so 6.5 days is already "1.0 Week".
pub fn humanize(parts: DurationParts) -> HumanDuration {
    let total = parts.total_minutes();

    let unit = DurationUnit::ASCENDING
        .into_iter()
        .find(|unit| match unit.rollover() {
            Some(limit) => (total / unit.minutes()).round() < limit,
            None => true,
        })
        .unwrap_or(DurationUnit::Year);

    let mut value = round_tenth(total / unit.minutes());
    if unit != DurationUnit::Minute {
        value = value.max(1.0);
    }

    HumanDuration { value, unit }
}

/// [`humanize`] rendered as text: "30.0 Minutes", "1.0 Hour", "2.0 Years"
pub fn convert_duration(parts: DurationParts) -> String {
    humanize(parts).to_string()
}

/// Time between two moments in the largest sensible unit
pub fn time_passed(past: NaiveDateTime, current: NaiveDateTime) -> String {
    let minutes = (current - past).num_seconds() as f64 / 60.0;
    convert_duration(DurationParts::default().minutes(minutes))
}
