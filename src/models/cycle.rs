//! Budget cycle representation
//!
//! A cycle is the date range a food budget is spread over: either the plain
//! calendar month of the plan, or a fixed 30-day window starting on a chosen
//! day of month (optionally in an earlier or later month, e.g. a pay cycle
//! that starts on the 25th of the previous month).

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::month::CalendarMonth;

/// Length of a cycle that starts on a custom day, inclusive of both ends
pub const CUSTOM_CYCLE_DAYS: u32 = 30;

/// The persisted cycle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSettings {
    /// Day of month the cycle starts on; `None` means the calendar month
    #[serde(default)]
    pub start_day: Option<u32>,

    /// Months to shift the start by (-1 = previous month); only used with `start_day`
    #[serde(default, deserialize_with = "null_as_zero")]
    pub month_offset: i32,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(0))
}

impl CycleSettings {
    /// Calendar month cycle
    pub fn calendar() -> Self {
        Self::default()
    }

    /// 30-day cycle starting on `start_day`, shifted by `month_offset` months
    pub fn starting_on(start_day: u32, month_offset: i32) -> Self {
        Self {
            start_day: Some(start_day),
            month_offset,
        }
    }

    pub fn is_calendar_month(&self) -> bool {
        self.start_day.is_none()
    }

    pub fn validate(&self) -> Result<(), CycleValidationError> {
        match self.start_day {
            Some(day) if !(1..=31).contains(&day) => Err(CycleValidationError::InvalidStartDay(day)),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for CycleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start_day {
            None => write!(f, "calendar month"),
            Some(day) => match self.month_offset {
                0 => write!(f, "30 days from day {}", day),
                -1 => write!(f, "30 days from day {} of the previous month", day),
                1 => write!(f, "30 days from day {} of the next month", day),
                n => write!(f, "30 days from day {} (month offset {:+})", day, n),
            },
        }
    }
}

/// Validation errors for cycle settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleValidationError {
    InvalidStartDay(u32),
}

impl fmt::Display for CycleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStartDay(day) => {
                write!(f, "Start day must be between 1 and 31, got {}", day)
            }
        }
    }
}

impl std::error::Error for CycleValidationError {}

/// Build a date from a possibly out-of-range month index and day.
///
/// Rollover rules:
/// - `month0` is zero-based and may be negative or past 11; whole years are
///   carried, so `(2026, -1, 25)` is 2025-12-25 and `(2025, 12, 1)` is 2026-01-01.
/// - `day` is counted from the first of the resolved month, so a day past the
///   end of the month spills into the next one: `(2026, 1, 30)` (February 30th)
///   is 2026-03-02. Day 0 is the last day of the previous month.
///
/// Returns `None` only when the result is outside chrono's supported range.
pub fn normalized_date(year: i32, month0: i64, day: i64) -> Option<NaiveDate> {
    let year = i64::from(year) + month0.div_euclid(12);
    let month = month0.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first.checked_add_signed(Duration::days(day - 1))
}

/// An inclusive date range the budget is spread over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl CycleRange {
    /// Create a range; `end` is clamped so the range holds at least one day
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Resolve the cycle for a plan month
    pub fn resolve(month: CalendarMonth, settings: &CycleSettings) -> Option<Self> {
        match settings.start_day {
            None => Some(Self::new(month.first_day()?, month.last_day()?)),
            Some(day) => {
                let start = normalized_date(
                    month.year(),
                    i64::from(month.month0()) + i64::from(settings.month_offset),
                    i64::from(day),
                )?;
                let end = start.checked_add_signed(Duration::days(i64::from(CUSTOM_CYCLE_DAYS) - 1))?;
                Some(Self::new(start, end))
            }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, inclusive
    pub fn total_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterate every date of the range in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..i64::from(self.total_days())).map(move |i| start + Duration::days(i))
    }
}

impl fmt::Display for CycleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%-d %b %Y"),
            self.end.format("%-d %b %Y")
        )
    }
}
