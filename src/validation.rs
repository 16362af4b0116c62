//! Pre-flight checks for calendar inputs.
//!
//! Aggregation is best-effort and never rejects input: unknown day codes
//! match nothing, unparseable times render untimed. These checks report
//! such problems up front so a caller can surface them. Detects:
//! - Activities with no name or no preferred days
//! - Day codes that name no weekday
//! - Time text the normalizer rejects
//! - Weekly rules with an empty title

use std::collections::HashSet;

use crate::models::{parse_weekday, ActivityRequest, ClockTime, WeeklyRule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An activity has a blank name.
    EmptyName,
    /// An activity lists no preferred days, so it is never placed.
    NoPreferredDays,
    /// A preferred day code matches no weekday.
    UnknownDayCode,
    /// Non-empty time text the normalizer cannot read.
    UnparseableTime,
    /// A weekly rule has a blank title.
    EmptyTitle,
    /// Two activities share a name. On a date both land on, the second is
    /// dropped when its time matches the first or is blank; with different
    /// times both are shown.
    DuplicateName,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates activity requests and weekly rules.
///
/// Checks:
/// 1. Every activity has a name, unique ignoring case
/// 2. Every activity has at least one preferred day
/// 3. Every preferred day code names a weekday
/// 4. Non-empty activity and rule times normalize
/// 5. Every rule has a title
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_inputs(activities: &[ActivityRequest], rules: &[WeeklyRule]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for act in activities {
        let name = act.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Activity with an empty name",
            ));
        } else if !names.insert(name.to_lowercase()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate activity name: {name}"),
            ));
        }

        if act.preferred_weekdays.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoPreferredDays,
                format!("Activity '{name}' has no preferred days"),
            ));
        }

        for code in &act.preferred_weekdays {
            if parse_weekday(code).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDayCode,
                    format!("Activity '{name}' prefers unknown day '{code}'"),
                ));
            }
        }

        let owner = format!("Activity '{name}'");
        errors.extend(check_time(&act.preferred_time, &owner));
    }

    for rule in rules {
        let title = rule.title.trim();
        if title.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTitle,
                format!("Weekly rule on {} has an empty title", rule.weekday),
            ));
        }
        errors.extend(check_time(&rule.time, &format!("Rule '{title}'")));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_time(time: &str, owner: &str) -> Option<ValidationError> {
    let time = time.trim();
    if time.is_empty() || ClockTime::normalize(time).is_some() {
        return None;
    }
    Some(ValidationError::new(
        ValidationErrorKind::UnparseableTime,
        format!("{owner} has unreadable time '{time}'"),
    ))
}
