//! Line style classification for raw cell text.
//!
//! Computed cells carry an explicit [`LineStyle`] per event. Raw override
//! text has no tags, so its style is inferred from shape, checked in order:
//!
//! 1. All cased letters uppercase (and at least one) -> `Holiday`
//! 2. Starts with `staff:` (any case) -> `Staff`
//! 3. Starts with a clock token (`H:MM`, optionally `am`/`pm`) -> `Timed`
//! 4. Anything else -> `Plain`
//!
//! Any all-caps line is treated as a holiday, whatever it says.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::LineStyle;

// Normalized times never carry am/pm, but hand-edited override text may.
static TIME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2}\s?(?:am|pm|AM|PM)?)\s?(.*)$").expect("static regex")
});

/// Whether `s` has at least one cased letter and no lowercase ones.
pub fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Infers the style of an untagged line.
pub fn classify(line: &str) -> LineStyle {
    if is_all_upper(line) {
        LineStyle::Holiday
    } else if line.to_lowercase().starts_with("staff:") {
        LineStyle::Staff
    } else if TIME_PREFIX.is_match(line) {
        LineStyle::Timed
    } else {
        LineStyle::Plain
    }
}

/// Splits a leading clock token from the rest of the line.
///
/// Returns `(time, rest)` with both parts trimmed, or `None` if the line
/// does not start with a clock token.
pub fn split_time_prefix(line: &str) -> Option<(&str, &str)> {
    let caps = TIME_PREFIX.captures(line)?;
    let time = caps.get(1)?.as_str().trim();
    let rest = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((time, rest))
}
