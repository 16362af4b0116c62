//! Cell content and the editable override layer.
//!
//! The aggregation stage yields a day map; callers may show each day's
//! text, let a person edit it, and pass the edits back as overrides. An
//! override replaces the computed text of its date entirely.
//!
//! Overrides are an explicit value keyed by month, passed into each
//! render call, so independent requests never share state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::classify::classify;
use super::wrap::wrap;
use crate::error::{CalendarError, Result};
use crate::models::{DayMap, LineStyle, YearMonth};
use crate::sources::clean_text;

/// One display line with its render style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    /// Creates a styled line.
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// What a day cell shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    /// Lines derived from events, styled by category.
    Computed(Vec<StyledLine>),
    /// Caller-supplied text; styles are inferred per line.
    Override(String),
}

impl CellContent {
    /// Logical lines with their styles.
    ///
    /// Override text is split on newlines; blank lines are dropped and
    /// each remaining line is classified by shape.
    pub fn lines(&self) -> Vec<StyledLine> {
        match self {
            Self::Computed(lines) => lines.clone(),
            Self::Override(text) => text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| StyledLine::new(l, classify(l)))
                .collect(),
        }
    }

    /// Lines word-wrapped to `width` characters, styled for drawing.
    ///
    /// Computed lines keep their tag on every wrapped piece, except that
    /// only the first piece of a timed line starts with the time, so its
    /// continuations draw plain. Override text is classified per piece.
    pub fn sub_lines(&self, width: usize) -> Vec<StyledLine> {
        let mut out = Vec::new();
        match self {
            Self::Computed(lines) => {
                for line in lines {
                    let text = clean_text(&line.text);
                    for (i, piece) in wrap(&text, width).into_iter().enumerate() {
                        let style = match line.style {
                            LineStyle::Timed if i > 0 => LineStyle::Plain,
                            style => style,
                        };
                        out.push(StyledLine::new(piece, style));
                    }
                }
            }
            Self::Override(text) => {
                for line in text.lines() {
                    let text = clean_text(line);
                    for piece in wrap(&text, width) {
                        let style = classify(&piece);
                        out.push(StyledLine::new(piece, style));
                    }
                }
            }
        }
        out
    }

    /// The cell as a newline-joined text blob.
    pub fn text(&self) -> String {
        match self {
            Self::Computed(lines) => lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Override(text) => text.clone(),
        }
    }
}

/// Computed per-day lines for a day map.
pub fn computed_cells(map: &DayMap) -> BTreeMap<NaiveDate, CellContent> {
    map.iter()
        .map(|(date, events)| {
            let lines = events
                .iter()
                .map(|e| {
                    let style = e.category().line_style();
                    StyledLine::new(e.display_line(), style)
                })
                .collect();
            (date, CellContent::Computed(lines))
        })
        .collect()
}

/// Per-date text blobs for one month (the editable preview).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTexts {
    pub month: YearMonth,
    pub texts: BTreeMap<NaiveDate, String>,
}

impl CellTexts {
    /// Text for every day of the map, one line per event.
    pub fn from_day_map(map: &DayMap) -> Self {
        Self {
            month: map.month(),
            texts: computed_cells(map)
                .into_iter()
                .map(|(d, c)| (d, c.text()))
                .collect(),
        }
    }

    /// Text for `date`, if inside the month.
    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.texts.get(&date).map(String::as_str)
    }

    /// Uses these texts (typically after editing) as an override layer.
    pub fn into_overrides(self) -> CellOverrides {
        CellOverrides {
            month: self.month,
            texts: self.texts,
        }
    }
}

/// Caller-edited cell text, keyed to one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOverrides {
    pub month: YearMonth,
    pub texts: BTreeMap<NaiveDate, String>,
}

impl CellOverrides {
    /// Creates an empty override layer.
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            texts: BTreeMap::new(),
        }
    }

    /// Sets the override for one date.
    pub fn with_text(mut self, date: NaiveDate, text: impl Into<String>) -> Self {
        self.texts.insert(date, text.into());
        self
    }

    /// Number of overridden dates.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether no date is overridden.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Final content for every day: computed text, replaced by overrides.
///
/// # Errors
/// `CalendarError::MonthMismatch` if the override layer belongs to a
/// different month. Override dates outside the month are ignored.
pub fn resolve_cells(
    map: &DayMap,
    overrides: Option<&CellOverrides>,
) -> Result<BTreeMap<NaiveDate, CellContent>> {
    let mut cells = computed_cells(map);

    if let Some(overrides) = overrides {
        if overrides.month != map.month() {
            return Err(CalendarError::MonthMismatch {
                expected: map.month().to_string(),
                found: overrides.month.to_string(),
            });
        }
        for (date, text) in &overrides.texts {
            match cells.get_mut(date) {
                Some(cell) => *cell = CellContent::Override(text.clone()),
                None => warn!(%date, "Ignoring override outside the month"),
            }
        }
    }

    Ok(cells)
}
