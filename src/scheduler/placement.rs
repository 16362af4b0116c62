//! First-fit activity placement.
//!
//! # Algorithm
//!
//! 1. Walk the month's dates in ascending order.
//! 2. Emit one event on each date whose weekday code is preferred.
//! 3. Stop after `frequency` placements (never, when `frequency == 0`).
//!
//! No rebalancing, spacing or conflict avoidance: when more matching days
//! exist than the cap allows, the later ones are dropped. Requests are
//! independent of each other.
//!
//! # Complexity
//! O(r * d) where r=requests, d=days in month.

use chrono::Datelike;
use tracing::debug;

use crate::models::{ActivityRequest, ClockTime, Event, YearMonth};

/// Places one request into `month`.
pub fn place_activity(month: YearMonth, request: &ActivityRequest) -> Vec<Event> {
    let time = ClockTime::normalize(&request.preferred_time);
    let mut placed = Vec::new();

    for date in month.days() {
        if !request.is_unbounded() && placed.len() >= request.frequency as usize {
            break;
        }
        if request.prefers(date.weekday()) {
            placed.push(Event::activity(date, time, request.name.clone()));
        }
    }

    if !request.is_unbounded() && placed.len() < request.frequency as usize {
        debug!(
            activity = %request.name,
            requested = request.frequency,
            placed = placed.len(),
            "Fewer matching days than requested frequency"
        );
    }
    placed
}

/// Places every request, in request order.
///
/// ```
/// use u_calendar::models::{ActivityRequest, YearMonth};
/// use u_calendar::scheduler::place_activities;
///
/// let month = YearMonth::new(2025, 11).unwrap();
/// let quiz = ActivityRequest::new("Quiz").with_days(["Fri"]).with_frequency(2);
/// let events = place_activities(month, &[quiz]);
/// assert_eq!(events.len(), 2);
/// ```
pub fn place_activities(month: YearMonth, requests: &[ActivityRequest]) -> Vec<Event> {
    requests
        .iter()
        .flat_map(|r| place_activity(month, r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn nov() -> YearMonth {
        YearMonth::new(2025, 11).unwrap()
    }

    fn coffee(frequency: u32) -> ActivityRequest {
        ActivityRequest::new("Coffee & Chat")
            .with_days(["mon", "wed", "fri", "sun"])
            .with_time("11:00")
            .with_frequency(frequency)
    }

    #[test]
    fn test_frequency_cap_first_dates_win() {
        // November 2025 has 17 Mon/Wed/Fri/Sun dates.
        let events = place_activity(nov(), &coffee(12));
        assert_eq!(events.len(), 12);

        let all = place_activity(nov(), &coffee(0));
        assert_eq!(all.len(), 17);
        assert_eq!(events[..], all[..12]);
        assert!(events.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_unbounded_places_every_match() {
        let events = place_activity(nov(), &coffee(0));
        assert!(events.iter().all(|e| {
            let code = crate::models::weekday_code(e.date.weekday());
            ["mon", "wed", "fri", "sun"].contains(&code)
        }));
        let first_sunday = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        assert_eq!(events[0].date, first_sunday);
    }

    #[test]
    fn test_cap_above_matches() {
        let events = place_activity(nov(), &coffee(40));
        assert_eq!(events.len(), 17);
    }

    #[test]
    fn test_time_normalized() {
        let events = place_activity(nov(), &coffee(1));
        assert_eq!(events[0].display_line(), "11:00 Coffee & Chat");

        let untimed = place_activity(nov(), &coffee(1).with_time("after lunch"));
        assert!(untimed[0].time().is_none());
    }

    #[test]
    fn test_no_preferred_days() {
        let req = ActivityRequest::new("Nothing").with_frequency(3);
        assert!(place_activity(nov(), &req).is_empty());
    }

    #[test]
    fn test_requests_are_independent() {
        let quiz = ActivityRequest::new("Quiz")
            .with_days(["sun"])
            .with_frequency(1);
        let events = place_activities(nov(), &[coffee(1), quiz]);
        assert_eq!(events.len(), 2);
        // Both land on Sunday the 2nd; no conflict avoidance.
        assert_eq!(events[0].date, events[1].date);
        let first_sunday = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        assert_eq!(events[1].date, first_sunday);
    }
}
