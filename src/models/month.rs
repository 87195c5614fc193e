//! Month plan model
//!
//! A month plan is identified by a human name such as "December 2025" and
//! carries the month's income plus its expenses. [`CalendarMonth`] is the
//! parsed form of that name.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Expense;
use super::ids::MonthId;
use super::money::Money;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month (year + month 1-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Create a calendar month, `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        let candidate = Self { year, month };
        // both ends of the month must be representable dates
        if candidate.first_day().is_none() || candidate.last_day().is_none() {
            return Err(MonthParseError::YearOutOfRange(year));
        }
        Ok(candidate)
    }

    /// The month containing a date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a month plan name
    ///
    /// Formats:
    /// - "December 2025", "Dec 2025", "december, 2025"
    /// - "2025-12"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let invalid = || MonthParseError::InvalidFormat(s.to_string());

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year.trim().parse().map_err(|_| invalid())?;
            let month: u32 = month.trim().parse().map_err(|_| invalid())?;
            return Self::new(year, month);
        }

        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty());
        let name = parts.next().ok_or_else(invalid)?;
        let year = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let month = month_from_name(name).ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based month index, 0-11
    pub fn month0(&self) -> u32 {
        self.month - 1
    }

    /// English month name ("December")
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month0() as usize]
    }

    /// First day of the month, `None` past the supported date range
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month, `None` past the supported date range
    pub fn last_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
    }

    pub fn days_in_month(&self) -> Option<u32> {
        self.last_day().map(|day| day.day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| {
            let full = full.to_lowercase();
            // full names, or 3-4 letter abbreviations ("Dec", "Sept")
            full == lower || (full.starts_with(&lower) && lower.len() <= 4)
        })
        .map(|i| i as u32 + 1)
}

/// Displays as the month plan name, e.g. "December 2025"
impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Error type for month name parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month name: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for MonthParseError {}

/// A month plan as returned by the data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Month {
    pub id: MonthId,

    /// Display name, "December 2025"
    pub name: String,

    pub total_income: Money,

    /// Present when fetched as a month's detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<Expense>>,

    pub created_at: DateTime<Utc>,
}

impl Month {
    /// Expenses of the month, empty when the detail hasn't been fetched
    pub fn expenses(&self) -> &[Expense] {
        self.expenses.as_deref().unwrap_or(&[])
    }

    /// The calendar month named by this plan
    pub fn calendar_month(&self) -> Result<CalendarMonth, MonthParseError> {
        CalendarMonth::parse(&self.name)
    }
}

/// Payload for creating a month plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMonth {
    pub name: String,
    pub total_income: Money,
    /// Pre-fill expenses from each category's default amount
    pub auto_fill_from_template: bool,
}

impl NewMonth {
    pub fn for_month(month: CalendarMonth, total_income: Money) -> Self {
        Self {
            name: month.to_string(),
            total_income,
            auto_fill_from_template: true,
        }
    }
}
