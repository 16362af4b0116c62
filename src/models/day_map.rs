//! Per-day schedule for one month.
//!
//! # Invariant
//! The key set is exactly the contiguous dates of the month, from day 1 to
//! the last day, whether or not any events exist. Insertions for dates
//! outside the month are ignored. Deserialization restores missing days
//! as empty buckets and rejects dates from another month.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::Event;
use super::month::YearMonth;
use crate::error::CalendarError;

/// Mapping from every date of a month to its ordered events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDayMap", into = "RawDayMap")]
pub struct DayMap {
    month: YearMonth,
    days: BTreeMap<NaiveDate, Vec<Event>>,
}

#[derive(Serialize, Deserialize)]
struct RawDayMap {
    month: YearMonth,
    days: BTreeMap<NaiveDate, Vec<Event>>,
}

impl TryFrom<RawDayMap> for DayMap {
    type Error = CalendarError;

    fn try_from(raw: RawDayMap) -> Result<Self, Self::Error> {
        let mut map = Self::new(raw.month);
        for (date, events) in raw.days {
            if !raw.month.contains(date) {
                return Err(CalendarError::MonthMismatch {
                    expected: raw.month.to_string(),
                    found: date.to_string(),
                });
            }
            if let Some(bucket) = map.days.get_mut(&date) {
                *bucket = events;
            }
        }
        Ok(map)
    }
}

impl From<DayMap> for RawDayMap {
    fn from(map: DayMap) -> Self {
        Self {
            month: map.month,
            days: map.days,
        }
    }
}

impl DayMap {
    /// Creates the empty skeleton: one bucket per calendar day.
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            days: month.days().map(|d| (d, Vec::new())).collect(),
        }
    }

    /// The month this map covers.
    #[inline]
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Number of day buckets.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Whether `date` is a key of this map.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Events on `date`, or `None` if outside the month.
    pub fn events(&self, date: NaiveDate) -> Option<&[Event]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    /// Appends an event to its day without any duplicate check.
    ///
    /// Returns `false` (and drops the event) if its date is outside the month.
    pub fn push(&mut self, event: Event) -> bool {
        match self.days.get_mut(&event.date) {
            Some(bucket) => {
                bucket.push(event);
                true
            }
            None => false,
        }
    }

    /// Iterates `(date, events)` in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Event])> {
        self.days.iter().map(|(d, evs)| (*d, evs.as_slice()))
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Total number of events across all days.
    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub(crate) fn bucket_mut(&mut self, date: NaiveDate) -> Option<&mut Vec<Event>> {
        self.days.get_mut(&date)
    }

    pub(crate) fn buckets_mut(&mut self) -> impl Iterator<Item = &mut Vec<Event>> {
        self.days.values_mut()
    }
}
