//! Holiday source.
//!
//! Holidays arrive from external feeds as `(date, title)` pairs. A feed
//! that lists the same holiday under several regions produces repeats,
//! so this stage deduplicates by `(date, lowercase trimmed title)` before
//! anything reaches the day map.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::text::clean_text;
use crate::error::Result;
use crate::models::{Event, YearMonth};

/// Regions read from the UK bank-holiday feed, in order.
pub const BANK_HOLIDAY_REGIONS: [&str; 3] = ["england-and-wales", "scotland", "northern-ireland"];

/// One holiday as supplied by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInput {
    /// Holiday date.
    pub date: NaiveDate,
    /// Holiday title (raw provider text).
    pub title: String,
}

impl HolidayInput {
    /// Creates a holiday input.
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
        }
    }

    /// Parses a `YYYY-MM-DD` date; `None` if the date is malformed.
    pub fn parse(date: &str, title: impl Into<String>) -> Option<Self> {
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .ok()
            .map(|d| Self::new(d, title))
    }
}

/// Normalizes provider holidays into `Holiday` events for `month`.
///
/// Out-of-month entries are dropped silently. Repeats of the same
/// `(date, title)` (compared after cleaning, trimming and lowercasing)
/// keep only the first occurrence.
pub fn holiday_events(month: YearMonth, holidays: &[HolidayInput]) -> Vec<Event> {
    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();
    let mut events = Vec::new();

    for h in holidays {
        if !month.contains(h.date) {
            continue;
        }
        let title = clean_text(&h.title);
        if !seen.insert((h.date, title.to_lowercase())) {
            continue;
        }
        events.push(Event::holiday(h.date, title));
    }

    debug!(
        month = %month,
        supplied = holidays.len(),
        kept = events.len(),
        "Normalized holidays"
    );
    events
}

#[derive(Debug, Deserialize)]
struct Division {
    #[serde(default)]
    events: Vec<FeedEvent>,
}

#[derive(Debug, Deserialize)]
struct FeedEvent {
    title: String,
    date: String,
}

/// Parses the UK bank-holiday JSON payload for one month.
///
/// The payload maps region names to `{division, events: [{title, date, ..}]}`.
/// All three regions are read, so holidays shared across regions appear
/// more than once; [`holiday_events`] collapses them. Events with bad dates
/// are skipped.
///
/// # Errors
/// `CalendarError::Json` if the payload is not valid JSON of that shape.
pub fn parse_bank_holidays(json: &str, month: YearMonth) -> Result<Vec<HolidayInput>> {
    let payload: HashMap<String, Division> = serde_json::from_str(json)?;
    let mut out = Vec::new();

    for region in BANK_HOLIDAY_REGIONS {
        let Some(division) = payload.get(region) else {
            continue;
        };
        for ev in &division.events {
            match HolidayInput::parse(&ev.date, clean_text(&ev.title)) {
                Some(h) if month.contains(h.date) => out.push(h),
                Some(_) => {}
                None => debug!(region, date = %ev.date, "Skipping bank holiday with bad date"),
            }
        }
    }

    Ok(out)
}

/// Built-in awareness and observance days, keyed by (month, day).
const AWARENESS_DAYS: [(u32, u32, &str); 12] = [
    (11, 1, "World Vegan Day"),
    (11, 1, "All Saints' Day"),
    (11, 2, "All Souls\u{2019} Day"),
    (11, 5, "Bonfire Night (UK)"),
    (11, 11, "Remembrance Day (UK)"),
    (11, 13, "World Kindness Day"),
    (11, 14, "World Diabetes Day"),
    (11, 16, "International Day for Tolerance"),
    (11, 19, "International Men\u{2019}s Day"),
    (11, 20, "Universal Children\u{2019}s Day"),
    (
        11,
        25,
        "International Day for the Elimination of Violence Against Women",
    ),
    (11, 30, "St Andrew\u{2019}s Day (Scotland)"),
];

/// Awareness days falling in `month`, from the built-in list.
pub fn awareness_days(month: YearMonth) -> Vec<HolidayInput> {
    AWARENESS_DAYS
        .iter()
        .filter(|(m, _, _)| *m == month.month())
        .filter_map(|&(m, d, title)| {
            let date = NaiveDate::from_ymd_opt(month.year(), m, d)?;
            Some(HolidayInput::new(date, clean_text(title)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nov() -> YearMonth {
        YearMonth::new(2025, 11).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_dedup_within_stage() {
        let inputs = vec![
            HolidayInput::new(date(11, 30), "St Andrew's Day"),
            HolidayInput::new(date(11, 30), "  st andrew's day "),
            HolidayInput::new(date(11, 30), "St Andrew\u{2019}s Day"),
            HolidayInput::new(date(11, 5), "St Andrew's Day"),
        ];
        let events = holiday_events(nov(), &inputs);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].display_line(), "ST ANDREW'S DAY");
    }

    #[test]
    fn test_out_of_month_filtered() {
        let inputs = vec![
            HolidayInput::new(date(12, 25), "Christmas Day"),
            HolidayInput::new(date(11, 11), "Remembrance Day"),
        ];
        let events = holiday_events(nov(), &inputs);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(11, 11));
    }

    #[test]
    fn test_parse_bank_holidays() {
        let json = r#"{
            "england-and-wales": {"division": "england-and-wales", "events": [
                {"title": "Christmas Day", "date": "2025-12-25", "notes": "", "bunting": true},
                {"title": "Boxing Day", "date": "2025-12-26", "notes": "", "bunting": true},
                {"title": "Early May bank holiday", "date": "2025-05-05", "notes": "", "bunting": true}
            ]},
            "scotland": {"division": "scotland", "events": [
                {"title": "Christmas Day", "date": "2025-12-25", "notes": "", "bunting": true},
                {"title": "St Andrew’s Day", "date": "2025-12-01", "notes": "Substitute day", "bunting": true},
                {"title": "Broken", "date": "25/12/2025", "notes": "", "bunting": true}
            ]}
        }"#;
        let dec = YearMonth::new(2025, 12).unwrap();
        let inputs = parse_bank_holidays(json, dec).unwrap();
        assert_eq!(inputs.len(), 4);
        assert_eq!(inputs[3].title, "St Andrew's Day");

        let events = holiday_events(dec, &inputs);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_parse_bank_holidays_bad_payload() {
        assert!(parse_bank_holidays("not json", nov()).is_err());
        assert!(parse_bank_holidays("{}", nov()).unwrap().is_empty());
    }

    #[test]
    fn test_awareness_days() {
        let days = awareness_days(nov());
        assert_eq!(days.len(), 12);
        assert!(days.iter().all(|h| h.title.is_ascii()));
        assert!(awareness_days(YearMonth::new(2025, 6).unwrap()).is_empty());
    }
}
