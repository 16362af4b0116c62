//! Recurring inputs: weekly rules and activity requests.
//!
//! Both describe "this thing happens on these weekdays"; they differ in
//! how many occurrences a month receives. A weekly rule fires on every
//! matching day, an activity request stops after `frequency` placements.

use std::collections::BTreeSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Three-letter lowercase weekday code (`mon` .. `sun`).
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Parses a day name by its first three letters, case-insensitively.
///
/// `"Thursday"`, `"thu"` and `" THU "` all yield `Weekday::Thu`.
pub fn parse_weekday(text: &str) -> Option<Weekday> {
    match day_code_of(text).as_str() {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// A rule that repeats on one weekday every week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRule {
    /// Weekday the rule fires on.
    pub weekday: Weekday,
    /// Free-form time text (normalized at merge time).
    pub time: String,
    /// Event title.
    pub title: String,
}

impl WeeklyRule {
    /// Creates a weekly rule.
    pub fn new(weekday: Weekday, time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            weekday,
            time: time.into(),
            title: title.into(),
        }
    }
}

/// A recurring activity with a monthly frequency cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRequest {
    /// Activity name (event title).
    pub name: String,
    /// Lowercase 3-letter day codes the activity may fall on.
    pub preferred_weekdays: BTreeSet<String>,
    /// Free-form preferred time text.
    pub preferred_time: String,
    /// Maximum placements per month; 0 = every matching day.
    pub frequency: u32,
}

impl ActivityRequest {
    /// Creates a request with no preferred days and unbounded frequency.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preferred_weekdays: BTreeSet::new(),
            preferred_time: String::new(),
            frequency: 0,
        }
    }

    /// Adds preferred days from names (`"Mon"`, `"wednesday"`, ...).
    ///
    /// Each name is reduced to its first three letters, lowercased.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for day in days {
            let code = day_code_of(day.as_ref());
            if !code.is_empty() {
                self.preferred_weekdays.insert(code);
            }
        }
        self
    }

    /// Sets the preferred time text.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.preferred_time = time.into();
        self
    }

    /// Sets the monthly frequency cap.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Whether the activity may fall on `day`.
    pub fn prefers(&self, day: Weekday) -> bool {
        self.preferred_weekdays.contains(weekday_code(day))
    }

    /// Whether the frequency cap is unbounded.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.frequency == 0
    }
}

/// Reduces a day name to its lowercase 3-letter code.
fn day_code_of(name: &str) -> String {
    let code: String = name.trim().chars().take(3).collect();
    code.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Thursday"), Some(Weekday::Thu));
        assert_eq!(parse_weekday(" SAT "), Some(Weekday::Sat));
        assert_eq!(parse_weekday("mo"), None);
        assert_eq!(parse_weekday(""), None);
    }

    #[test]
    fn test_weekday_code_roundtrip() {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(parse_weekday(weekday_code(day)), Some(day));
        }
    }

    #[test]
    fn test_activity_days() {
        let req = ActivityRequest::new("Coffee & Chat")
            .with_days(["Mon", " wednesday", "", "FRI"])
            .with_frequency(12);
        assert_eq!(req.preferred_weekdays.len(), 3);
        assert!(req.prefers(Weekday::Wed));
        assert!(!req.prefers(Weekday::Tue));
        assert!(!req.is_unbounded());
    }
}
