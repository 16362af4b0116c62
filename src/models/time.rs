//! Canonical clock times.
//!
//! # Normalization Contract
//!
//! Free-form time text is accepted only in the shape `H`, `HH`, `H:MM`,
//! `HH:MM`, `HMM` or `HHMM` after removing whitespace, lowercasing and
//! turning `.` into `:`. Anything else (AM/PM suffixes, words, extra
//! separators) is "no time". Hours and minutes are not range-checked;
//! out-of-range values keep their text but sort as end of day.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort position for untimed or out-of-range entries (23:59).
pub const END_OF_DAY_MINUTES: u16 = 23 * 60 + 59;

/// A canonical zero-padded 24-hour `HH:MM` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Parses free-form text, returning `None` for "no time".
    ///
    /// ```
    /// use u_calendar::models::ClockTime;
    ///
    /// assert_eq!(ClockTime::normalize("2:30").unwrap().to_string(), "02:30");
    /// assert_eq!(ClockTime::normalize("14.45").unwrap().to_string(), "14:45");
    /// assert!(ClockTime::normalize("2:30pm").is_none());
    /// assert!(ClockTime::normalize("").is_none());
    /// ```
    pub fn normalize(text: &str) -> Option<Self> {
        let cleaned: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '.' { ':' } else { c.to_ascii_lowercase() })
            .collect();

        let (hour, minute) = match cleaned.split_once(':') {
            Some((h, m)) => (h, Some(m)),
            None if !all_digits(&cleaned) => return None,
            None => match cleaned.len() {
                1 | 2 => (cleaned.as_str(), None),
                3 => (&cleaned[..1], Some(&cleaned[1..])),
                4 => (&cleaned[..2], Some(&cleaned[2..])),
                _ => return None,
            },
        };

        if hour.is_empty() || hour.len() > 2 || !all_digits(hour) {
            return None;
        }
        let minute = match minute {
            Some(m) if m.len() == 2 && all_digits(m) => m,
            Some(_) => return None,
            None => "00",
        };

        Some(Self {
            hour: hour.parse().ok()?,
            minute: minute.parse().ok()?,
        })
    }

    /// Creates a time from two-digit components (no wall-clock range check).
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 100 && minute < 100).then_some(Self { hour, minute })
    }

    /// Hour component.
    #[inline]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component.
    #[inline]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Whether this is a real wall-clock time (00:00..=23:59).
    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// Minutes since midnight, or end of day when out of range.
    pub fn sort_minutes(&self) -> u16 {
        if self.is_valid() {
            u16::from(self.hour) * 60 + u16::from(self.minute)
        } else {
            END_OF_DAY_MINUTES
        }
    }
}

/// Sort key for an optional time: untimed entries go last.
pub fn sort_minutes(time: Option<&ClockTime>) -> u16 {
    time.map_or(END_OF_DAY_MINUTES, ClockTime::sort_minutes)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value).ok_or_else(|| format!("not a clock time: {value:?}"))
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> Option<String> {
        ClockTime::normalize(s).map(|t| t.to_string())
    }

    #[test]
    fn test_padding_and_separators() {
        assert_eq!(norm("2:30").as_deref(), Some("02:30"));
        assert_eq!(norm("14.45").as_deref(), Some("14:45"));
        assert_eq!(norm(" 9 ").as_deref(), Some("09:00"));
        assert_eq!(norm("18").as_deref(), Some("18:00"));
        assert_eq!(norm("1 4 : 0 0").as_deref(), Some("14:00"));
    }

    #[test]
    fn test_compact_forms() {
        assert_eq!(norm("1430").as_deref(), Some("14:30"));
        assert_eq!(norm("930").as_deref(), Some("09:30"));
    }

    #[test]
    fn test_rejects() {
        assert_eq!(norm("2:30pm"), None);
        assert_eq!(norm("2pm"), None);
        assert_eq!(norm(""), None);
        assert_eq!(norm("   "), None);
        assert_eq!(norm("noon"), None);
        assert_eq!(norm("2:3"), None);
        assert_eq!(norm("123:00"), None);
        assert_eq!(norm("1:2:30"), None);
        assert_eq!(norm(":30"), None);
        assert_eq!(norm("12345"), None);
    }

    #[test]
    fn test_out_of_range_sorts_last() {
        let t = ClockTime::normalize("25:00").unwrap();
        assert_eq!(t.to_string(), "25:00");
        assert!(!t.is_valid());
        assert_eq!(t.sort_minutes(), END_OF_DAY_MINUTES);
        assert_eq!(sort_minutes(None), END_OF_DAY_MINUTES);
        assert_eq!(sort_minutes(Some(&ClockTime::new(9, 5).unwrap())), 545);
    }

    #[test]
    fn test_serde_as_string() {
        let t = ClockTime::normalize("7:05").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");
        let back: ClockTime = serde_json::from_str("\"07:05\"").unwrap();
        assert_eq!(back, t);
    }
}
