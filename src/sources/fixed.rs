//! Weekly rule source.
//!
//! Rules come either as typed rows (`weekday` as a day name) or as the
//! compact text form `Title:Day[:Time]`, one per line. Every rule expands
//! to one `Fixed` event per matching weekday of the month.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::text::clean_text;
use crate::models::{parse_weekday, ClockTime, Event, WeeklyRule, YearMonth};

/// Stock rules used when no configuration overrides them.
pub const DEFAULT_RULE_LINES: [&str; 3] = [
    "Film Night:Thu:18:00",
    "Dogs for Health:Thu:11:00",
    "Reminiscence:Sat:18:00",
];

/// A weekly rule with its weekday as free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyRuleRow {
    /// Day name (`"Thu"`, `"thursday"`, ...).
    pub weekday: String,
    /// Free-form time text.
    pub time: String,
    /// Event title.
    pub title: String,
}

impl WeeklyRuleRow {
    /// Resolves the day name; `None` (with a warning) if unrecognized.
    pub fn to_rule(&self) -> Option<WeeklyRule> {
        match parse_weekday(&self.weekday) {
            Some(day) => Some(WeeklyRule::new(day, self.time.trim(), self.title.trim())),
            None => {
                warn!(weekday = %self.weekday, title = %self.title, "Unknown rule weekday");
                None
            }
        }
    }
}

/// Parses rule lines of the form `Title:Day[:Time]`.
///
/// Everything after the second colon is the time text, so `"Quiz:Fri:14:30"`
/// keeps `14:30`. Blank lines are ignored; lines with fewer than two parts
/// or an unknown day are skipped with a warning.
///
/// ```
/// use u_calendar::sources::parse_rule_lines;
///
/// let rules = parse_rule_lines("Film Night:Thu:18:00\nQuiz:Fri");
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[0].time, "18:00");
/// assert_eq!(rules[1].time, "");
/// ```
pub fn parse_rule_lines(text: &str) -> Vec<WeeklyRule> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.splitn(3, ':').map(str::trim);
            let (Some(title), Some(day)) = (parts.next(), parts.next()) else {
                warn!(line, "Skipping rule line without a day");
                return None;
            };
            WeeklyRuleRow {
                weekday: day.to_string(),
                time: parts.next().unwrap_or_default().to_string(),
                title: title.to_string(),
            }
            .to_rule()
        })
        .collect()
}

/// Expands weekly rules into `Fixed` events, rule by rule, in date order.
///
/// Times are normalized here; text that does not normalize yields an
/// untimed event.
pub fn fixed_events(month: YearMonth, rules: &[WeeklyRule]) -> Vec<Event> {
    let mut events = Vec::new();
    for rule in rules {
        let time = ClockTime::normalize(&rule.time);
        let title = clean_text(&rule.title);
        for date in month.days().filter(|d| d.weekday() == rule.weekday) {
            events.push(Event::fixed(date, time, title.clone()));
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_parse_rule_lines() {
        let rules = parse_rule_lines(
            "Film Night:Thu:18:00\n\nDogs for Health : thursday : 11:30\nBroken\nBad:Xyz:10",
        );
        assert_eq!(rules.len(), 2);
        let film = WeeklyRule::new(Weekday::Thu, "18:00", "Film Night");
        assert_eq!(rules[0], film);
        assert_eq!(rules[1].title, "Dogs for Health");
        assert_eq!(rules[1].time, "11:30");
    }

    #[test]
    fn test_default_rules_parse() {
        assert_eq!(parse_rule_lines(&DEFAULT_RULE_LINES.join("\n")).len(), 3);
    }

    #[test]
    fn test_expands_every_matching_weekday() {
        // November 2025 has four Thursdays: 6, 13, 20, 27.
        let month = YearMonth::new(2025, 11).unwrap();
        let rules = vec![WeeklyRule::new(Weekday::Thu, "18:00", "Film Night")];
        let events = fixed_events(month, &rules);
        let days: Vec<u32> = events.iter().map(|e| e.date.day()).collect();
        assert_eq!(days, vec![6, 13, 20, 27]);
        let first = events[0].time().map(ToString::to_string);
        assert_eq!(first.as_deref(), Some("18:00"));
    }

    #[test]
    fn test_unparseable_time_is_untimed() {
        let month = YearMonth::new(2025, 11).unwrap();
        let rules = vec![WeeklyRule::new(Weekday::Sat, "6pm", "Reminiscence")];
        let events = fixed_events(month, &rules);
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| e.time().is_none()));
    }

    #[test]
    fn test_row_to_rule() {
        let row = WeeklyRuleRow {
            weekday: "Saturday".into(),
            time: "18".into(),
            title: "Reminiscence".into(),
        };
        assert_eq!(row.to_rule().unwrap().weekday, Weekday::Sat);
        let bad = WeeklyRuleRow {
            weekday: "someday".into(),
            ..row
        };
        assert!(bad.to_rule().is_none());
    }
}
