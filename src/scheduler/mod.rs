//! Month aggregation: placement, merge and ordering.
//!
//! Turns normalized source events into one consistent per-day timeline.
//!
//! # Algorithm
//!
//! `aggregate_month` inserts holidays and shifts directly, places
//! activities with a greedy first-fit pass, merges rule and activity
//! events under a title-based duplicate policy, then stable-sorts each
//! day by `(category priority, time)`.
//!
//! Placement is not an optimizer: no backtracking, no load
//! balancing, later matches past the frequency cap are dropped.

mod aggregate;
mod merge;
mod placement;

pub use aggregate::{aggregate_month, MonthRequest};
pub use merge::{merge_event, merge_events, sort_day, sort_day_map, MergeOutcome};
pub use placement::{place_activities, place_activity};
