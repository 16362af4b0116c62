//! Event model.
//!
//! An event is one scheduled item on one day. Each source produces a
//! different variant of [`EventKind`], carrying only the fields that
//! source knows about: holidays and staff shifts are never timed, weekly
//! rules and activities may be.
//!
//! # Category Priority
//!
//! | Category | Priority | Display line |
//! |----------|----------|--------------|
//! | Holiday | 0 | `TITLE IN CAPITALS` |
//! | StaffShift | 1 | `Staff: <name> (<start> – <end>)` |
//! | Fixed | 2 | `<HH:MM> <title>` |
//! | Activity | 2 | `<HH:MM> <title>` |

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::{sort_minutes, ClockTime};

/// Source category of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Public or awareness holiday.
    Holiday,
    /// Staff rota entry.
    StaffShift,
    /// Expanded weekly rule.
    Fixed,
    /// Placed activity request.
    Activity,
}

impl Category {
    /// Same-day ordering precedence (lower sorts first).
    #[inline]
    pub fn priority(self) -> u8 {
        match self {
            Self::Holiday => 0,
            Self::StaffShift => 1,
            Self::Fixed | Self::Activity => 2,
        }
    }

    /// Render style assigned to this category's display line.
    pub fn line_style(self) -> LineStyle {
        match self {
            Self::Holiday => LineStyle::Holiday,
            Self::StaffShift => LineStyle::Staff,
            Self::Fixed | Self::Activity => LineStyle::Timed,
        }
    }
}

/// How a cell line is drawn.
///
/// Set explicitly for computed content; re-derived from text shape only
/// for raw override text (see `render::classify`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// Bold, underlined to the measured text width.
    Holiday,
    /// Italic, staff colour.
    Staff,
    /// Leading clock time in bold, remainder in matching weight.
    Timed,
    /// Plain bold.
    Plain,
}

/// Start and end of a staff shift, as written in the rota.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftHours {
    /// Shift start text.
    pub start: String,
    /// Shift end text.
    pub end: String,
}

/// Category-specific event payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum EventKind {
    /// A holiday title.
    Holiday { title: String },
    /// A staff member on shift, with hours when both ends are known.
    StaffShift {
        staff: String,
        hours: Option<ShiftHours>,
    },
    /// A weekly rule occurrence.
    Fixed {
        time: Option<ClockTime>,
        title: String,
    },
    /// A placed activity.
    Activity {
        time: Option<ClockTime>,
        title: String,
    },
}

/// One scheduled item on a single day.
///
/// Events are immutable value records once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Day the event falls on.
    pub date: NaiveDate,
    /// Category payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Creates a holiday event.
    pub fn holiday(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            kind: EventKind::Holiday {
                title: title.into(),
            },
        }
    }

    /// Creates a staff shift event.
    pub fn staff_shift(
        date: NaiveDate,
        staff: impl Into<String>,
        hours: Option<ShiftHours>,
    ) -> Self {
        Self {
            date,
            kind: EventKind::StaffShift {
                staff: staff.into(),
                hours,
            },
        }
    }

    /// Creates a weekly-rule event.
    pub fn fixed(date: NaiveDate, time: Option<ClockTime>, title: impl Into<String>) -> Self {
        Self {
            date,
            kind: EventKind::Fixed {
                time,
                title: title.into(),
            },
        }
    }

    /// Creates an activity event.
    pub fn activity(date: NaiveDate, time: Option<ClockTime>, title: impl Into<String>) -> Self {
        Self {
            date,
            kind: EventKind::Activity {
                time,
                title: title.into(),
            },
        }
    }

    /// Source category.
    pub fn category(&self) -> Category {
        match self.kind {
            EventKind::Holiday { .. } => Category::Holiday,
            EventKind::StaffShift { .. } => Category::StaffShift,
            EventKind::Fixed { .. } => Category::Fixed,
            EventKind::Activity { .. } => Category::Activity,
        }
    }

    /// Canonical time, if any.
    pub fn time(&self) -> Option<&ClockTime> {
        match &self.kind {
            EventKind::Fixed { time, .. } | EventKind::Activity { time, .. } => time.as_ref(),
            EventKind::Holiday { .. } | EventKind::StaffShift { .. } => None,
        }
    }

    /// Title text. Staff shifts render as `"<name> (<start> – <end>)"`.
    pub fn title(&self) -> Cow<'_, str> {
        match &self.kind {
            EventKind::Holiday { title }
            | EventKind::Fixed { title, .. }
            | EventKind::Activity { title, .. } => Cow::Borrowed(title),
            EventKind::StaffShift { staff, hours } => match hours {
                Some(h) => Cow::Owned(format!("{staff} ({} \u{2013} {})", h.start, h.end)
                    .trim()
                    .to_string()),
                None => Cow::Borrowed(staff),
            },
        }
    }

    /// Lowercased, trimmed title used to detect duplicates.
    pub fn dedup_title(&self) -> String {
        self.title().trim().to_lowercase()
    }

    /// Same-day ordering key: category priority, then time (untimed last).
    pub fn sort_key(&self) -> (u8, u16) {
        (self.category().priority(), sort_minutes(self.time()))
    }

    /// One line of cell text for this event.
    pub fn display_line(&self) -> String {
        match &self.kind {
            EventKind::Holiday { title } => title.to_uppercase(),
            EventKind::StaffShift { .. } => format!("Staff: {}", self.title()),
            EventKind::Fixed { time, title } | EventKind::Activity { time, title } => match time {
                Some(t) => format!("{t} {title}").trim().to_string(),
                None => title.trim().to_string(),
            },
        }
    }
}
