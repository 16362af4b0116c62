//! Calendar month handle.
//!
//! `YearMonth` is the only way into the aggregation and render stages, so
//! an out-of-range month is rejected once, at construction, and every
//! downstream stage can rely on a valid first/last day.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// English month names, January first.
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

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth", into = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
    first: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = CalendarError;

    fn try_from(raw: RawYearMonth) -> Result<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl From<YearMonth> for RawYearMonth {
    fn from(ym: YearMonth) -> Self {
        Self {
            year: ym.year,
            month: ym.month,
        }
    }
}

impl YearMonth {
    /// Creates a month handle.
    ///
    /// # Errors
    /// `CalendarError::InvalidMonth` if `month` is outside 1..=12 or the
    /// year cannot be represented.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::InvalidMonth { year, month })?;
        // The last day must be representable too.
        first
            .checked_add_months(Months::new(1))
            .ok_or(CalendarError::InvalidMonth { year, month })?;
        Ok(Self { year, month, first })
    }

    /// Calendar year.
    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number (1..=12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// English month name.
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// First day of the month.
    #[inline]
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first)
    }

    /// Number of days in the month (28..=31).
    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    /// Every date of the month, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first;
        (0..self.day_count()).filter_map(move |offset| {
            first.checked_add_days(chrono::Days::new(u64::from(offset)))
        })
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Monday-first week rows: `weeks()[row][col]` is the day-of-month
    /// shown in that cell, or `None` for padding.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        for date in self.days() {
            let col = date.weekday().num_days_from_monday() as usize;
            week[col] = Some(date.day());
            if date.weekday() == Weekday::Sun {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }
        weeks
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
