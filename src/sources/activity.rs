//! Activity request source.
//!
//! Activity rows carry their preferred days as a `;`-joined list of day
//! names and their frequency as text. Placement itself lives in
//! `scheduler::place_activities`.

use serde::{Deserialize, Serialize};

use super::text::clean_text;
use crate::models::ActivityRequest;

/// One activity row as read from a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityRow {
    /// Activity name.
    pub name: String,
    /// Older tables name the column `activity_name`; used when `name` is blank.
    pub activity_name: String,
    /// Day names joined by `;` (e.g. `"Mon; Wed; Fri"`).
    pub preferred_days: String,
    /// Free-form preferred time.
    pub preferred_time: String,
    /// Placements per month as text; anything but digits means unbounded.
    pub frequency: String,
    /// Staff needed (informational).
    pub staff_required: String,
    /// Free-form notes (informational).
    pub notes: String,
}

impl ActivityRow {
    /// Creates an activity row.
    pub fn new(
        name: impl Into<String>,
        preferred_days: impl Into<String>,
        preferred_time: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            preferred_days: preferred_days.into(),
            preferred_time: preferred_time.into(),
            frequency: frequency.into(),
            ..Self::default()
        }
    }

    /// Converts the row into a typed request.
    ///
    /// ```
    /// use u_calendar::sources::ActivityRow;
    ///
    /// let req = ActivityRow::new("Coffee & Chat", "Mon;Wed;Fri;Sun", "11:00", "12").to_request();
    /// assert_eq!(req.frequency, 12);
    /// assert_eq!(req.preferred_weekdays.len(), 4);
    /// ```
    pub fn to_request(&self) -> ActivityRequest {
        let name = if self.name.trim().is_empty() {
            &self.activity_name
        } else {
            &self.name
        };
        ActivityRequest::new(clean_text(name))
            .with_days(self.preferred_days.split(';'))
            .with_time(self.preferred_time.trim())
            .with_frequency(parse_frequency(&self.frequency))
    }
}

/// Parses a frequency; non-digit text (including negatives) becomes 0.
pub fn parse_frequency(text: &str) -> u32 {
    let text = text.trim();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().unwrap_or(u32::MAX)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_frequency("12"), 12);
        assert_eq!(parse_frequency(" 4 "), 4);
        assert_eq!(parse_frequency(""), 0);
        assert_eq!(parse_frequency("-3"), 0);
        assert_eq!(parse_frequency("2.5"), 0);
        assert_eq!(parse_frequency("weekly"), 0);
        assert_eq!(parse_frequency("99999999999"), u32::MAX);
    }

    #[test]
    fn test_days_reduced_to_codes() {
        let req = ActivityRow::new("Bingo", "Monday; ; wed ;FRIDAY", "2pm", "x").to_request();
        let codes: Vec<&str> = req.preferred_weekdays.iter().map(String::as_str).collect();
        assert_eq!(codes, vec!["fri", "mon", "wed"]);
        assert!(req.is_unbounded());
        assert_eq!(req.preferred_time, "2pm");
    }
}
