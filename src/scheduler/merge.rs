//! Duplicate resolution and same-day ordering.
//!
//! # Merge Policy
//!
//! Applies to `Fixed` and `Activity` candidates only. For a candidate on
//! day `d` with title `T` (lowercased, trimmed) and time `t`:
//!
//! 1. Existing events on `d` whose title equals `T` are duplicates.
//! 2. A duplicate with time exactly `t` (both absent counts) discards the
//!    candidate.
//! 3. A timed duplicate discards an untimed candidate.
//! 4. Otherwise the candidate is inserted, even if its title repeats an
//!    existing entry at a different time.
//!
//! # Sort Policy
//!
//! Stable sort by `(category priority, time)` with untimed entries at
//! 23:59, so insertion order breaks ties.

use tracing::trace;

use crate::models::{DayMap, Event};

/// What happened to a merge candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Added to its day.
    Inserted,
    /// Dropped: same title at the same time already present.
    ExactRepeat,
    /// Dropped: untimed repeat of an already-timed title.
    UntimedRepeat,
    /// Dropped: date outside the map's month.
    OutsideMonth,
}

impl MergeOutcome {
    /// Whether the candidate ended up in the map.
    #[inline]
    pub fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Inserts `candidate` into `map` under the merge policy.
pub fn merge_event(map: &mut DayMap, candidate: Event) -> MergeOutcome {
    let Some(bucket) = map.bucket_mut(candidate.date) else {
        return MergeOutcome::OutsideMonth;
    };

    let title = candidate.dedup_title();
    let time = candidate.time().copied();
    let mut has_exact = false;
    let mut has_timed = false;

    for existing in bucket.iter().filter(|e| e.dedup_title() == title) {
        let existing_time = existing.time().copied();
        has_exact |= existing_time == time;
        has_timed |= existing_time.is_some();
    }

    let outcome = if has_exact {
        MergeOutcome::ExactRepeat
    } else if has_timed && time.is_none() {
        MergeOutcome::UntimedRepeat
    } else {
        bucket.push(candidate);
        return MergeOutcome::Inserted;
    };

    trace!(%title, ?outcome, "Discarded duplicate");
    outcome
}

/// Merges candidates in order, returning how many were inserted.
pub fn merge_events<I>(map: &mut DayMap, candidates: I) -> usize
where
    I: IntoIterator<Item = Event>,
{
    candidates
        .into_iter()
        .map(|c| merge_event(map, c))
        .filter(|o| o.is_inserted())
        .count()
}

/// Orders one day's events by category priority, then time.
pub fn sort_day(events: &mut [Event]) {
    events.sort_by_key(Event::sort_key);
}

/// Orders every day of the map.
pub fn sort_day_map(map: &mut DayMap) {
    for bucket in map.buckets_mut() {
        sort_day(bucket);
    }
}
