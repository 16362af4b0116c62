//! Staff rota source.
//!
//! Rota rows are raw text. A row whose date does not parse is skipped,
//! never an error. Staff names lose a trailing numeric id (`"Lucy 2"`
//! becomes `"Lucy"`), and the shift hours are shown only when both ends
//! are present.
//!
//! Slash dates are read day-first: `05/11/2025` is 5 November, as UK rotas
//! write it. US-style month-first dates are not recognized and would be
//! read as the wrong day whenever both fields are 12 or less.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::text::clean_text;
use crate::models::{Event, ShiftHours, YearMonth};

static TRAILING_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\d+$").expect("static regex"));

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// One staff rota row as read from a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftRow {
    /// Shift date text.
    pub date: String,
    /// Staff display name.
    pub staff: String,
    /// Shift start text.
    pub shift_start: String,
    /// Shift end text.
    pub shift_end: String,
    /// Staff role (informational, not rendered).
    pub role: String,
}

impl ShiftRow {
    /// Creates a rota row.
    pub fn new(
        date: impl Into<String>,
        staff: impl Into<String>,
        shift_start: impl Into<String>,
        shift_end: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            staff: staff.into(),
            shift_start: shift_start.into(),
            shift_end: shift_end.into(),
            role: String::new(),
        }
    }
}

/// Parses a rota date in any of the accepted layouts.
pub fn parse_rota_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
                .map(|dt| dt.date())
        })
}

/// Strips a disambiguating numeric suffix from a staff name.
pub fn normalize_staff_name(name: &str) -> String {
    TRAILING_ID.replace(&clean_text(name), "").into_owned()
}

/// Normalizes rota rows into `StaffShift` events for `month`.
pub fn shift_events(month: YearMonth, rows: &[ShiftRow]) -> Vec<Event> {
    let mut events = Vec::new();

    for row in rows {
        let Some(date) = parse_rota_date(&row.date) else {
            warn!(date = %row.date, staff = %row.staff, "Skipping rota row with unparseable date");
            continue;
        };
        if !month.contains(date) {
            continue;
        }

        let staff = normalize_staff_name(&row.staff);
        let start = row.shift_start.trim();
        let end = row.shift_end.trim();
        let hours = (!start.is_empty() && !end.is_empty()).then(|| ShiftHours {
            start: start.to_string(),
            end: end.to_string(),
        });

        if staff.is_empty() && hours.is_none() {
            continue;
        }
        events.push(Event::staff_shift(date, staff, hours));
    }

    debug!(month = %month, rows = rows.len(), kept = events.len(), "Normalized rota");
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;

    fn nov() -> YearMonth {
        YearMonth::new(2025, 11).unwrap()
    }

    #[test]
    fn test_title_with_hours() {
        let rows = vec![ShiftRow::new("2025-11-01", "Lucy", "09:00", "16:30")];
        let events = shift_events(nov(), &rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Lucy (09:00 \u{2013} 16:30)");
    }

    #[test]
    fn test_missing_end_time_shows_name_only() {
        let rows = vec![ShiftRow::new("2025-11-01", "Lucy", "09:00", " ")];
        let events = shift_events(nov(), &rows);
        assert_eq!(events[0].title(), "Lucy");
    }

    #[test]
    fn test_trailing_id_stripped() {
        assert_eq!(normalize_staff_name("Lucy 2"), "Lucy");
        assert_eq!(normalize_staff_name("Sam42"), "Sam");
        assert_eq!(normalize_staff_name("R2 D2 7"), "R2 D2");
    }

    #[test]
    fn test_bad_rows_skipped() {
        let rows = vec![
            ShiftRow::new("not a date", "Lucy", "09:00", "16:30"),
            ShiftRow::new("2025-12-01", "Lucy", "09:00", "16:30"),
            ShiftRow::new("2025-11-02", "  ", "", ""),
            ShiftRow::new("03/11/2025", "Tom", "", ""),
        ];
        let events = shift_events(nov(), &rows);
        assert_eq!(events.len(), 1);
        let third = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        assert_eq!(events[0].date, third);
        let kind = &events[0].kind;
        assert!(matches!(kind, EventKind::StaffShift { hours: None, .. }));
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 4);
        assert_eq!(parse_rota_date("2025-11-04"), expected);
        assert_eq!(parse_rota_date("2025/11/04"), expected);
        assert_eq!(parse_rota_date("04/11/2025"), expected);
        assert_eq!(parse_rota_date("2025-11-04 08:00:00"), expected);
        assert_eq!(parse_rota_date("2025-11-04T08:00:00"), expected);
        assert_eq!(parse_rota_date(""), None);
    }

    #[test]
    fn test_slash_dates_day_first() {
        let fifth = NaiveDate::from_ymd_opt(2025, 11, 5);
        assert_eq!(parse_rota_date("05/11/2025"), fifth);
        assert_eq!(parse_rota_date("11/25/2025"), None);
    }
}
