//! Property tests for aggregation invariants.
//!
//! - Every day of any month has a (possibly empty) entry
//! - Aggregation is deterministic
//! - No same-day repeat of a title at the same time
//! - Days are ordered by category priority, then time
//! - Time normalization is idempotent

use std::collections::HashSet;

use proptest::prelude::*;
use u_calendar::models::{ActivityRequest, ClockTime, WeeklyRule, YearMonth};
use u_calendar::render::CellTexts;
use u_calendar::scheduler::{aggregate_month, MonthRequest};
use u_calendar::sources::ShiftRow;

const DAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];
const TITLES: [&str; 4] = ["Bingo", "bingo ", "Film Night", "Quiz"];
const TIMES: [&str; 5] = ["", "10:30", "1030", "2pm", "18"];

fn activity_strategy() -> impl Strategy<Value = ActivityRequest> {
    (
        0..TITLES.len(),
        proptest::collection::vec(0..DAYS.len(), 0..4),
        0..TIMES.len(),
        0u32..6,
    )
        .prop_map(|(title, days, time, frequency)| {
            ActivityRequest::new(TITLES[title])
                .with_days(days.into_iter().map(|d| DAYS[d]))
                .with_time(TIMES[time])
                .with_frequency(frequency)
        })
}

fn rule_strategy() -> impl Strategy<Value = WeeklyRule> {
    (0..DAYS.len(), 0..TIMES.len(), 0..TITLES.len()).prop_map(|(day, time, title)| {
        let weekday = u_calendar::models::parse_weekday(DAYS[day]).unwrap();
        WeeklyRule::new(weekday, TIMES[time], TITLES[title])
    })
}

fn request_strategy() -> impl Strategy<Value = MonthRequest> {
    (
        1900i32..2100,
        1u32..=12,
        proptest::collection::vec(activity_strategy(), 0..6),
        proptest::collection::vec(rule_strategy(), 0..4),
        proptest::collection::vec((1u32..=31, 0usize..3), 0..5),
    )
        .prop_map(|(year, month, activities, rules, shifts)| {
            let month = YearMonth::new(year, month).unwrap();
            let shift_rows = shifts
                .into_iter()
                .map(|(day, who)| {
                    let date = format!("{}-{:02}-{:02}", month.year(), month.month(), day);
                    ShiftRow::new(date, ["Lucy", "Tom 3", ""][who], "09:00", "17:00")
                })
                .collect();
            MonthRequest::new(month)
                .with_activities(activities)
                .with_weekly_rules(rules)
                .with_shift_rows(shift_rows)
        })
}

#[test]
fn proptest_every_day_present() {
    proptest!(|(request in request_strategy())| {
        let map = aggregate_month(&request);
        let month = request.month;
        prop_assert_eq!(map.day_count() as u32, month.day_count());
        for date in month.days() {
            prop_assert!(map.events(date).is_some());
        }
    });
}

#[test]
fn proptest_aggregation_deterministic() {
    proptest!(|(request in request_strategy())| {
        let a = aggregate_month(&request);
        let b = aggregate_month(&request);
        prop_assert_eq!(CellTexts::from_day_map(&a), CellTexts::from_day_map(&b));
        prop_assert_eq!(a, b);
    });
}

#[test]
fn proptest_no_exact_repeats() {
    proptest!(|(request in request_strategy())| {
        let map = aggregate_month(&request);
        for (_, events) in map.iter() {
            let mut seen = HashSet::new();
            for e in events.iter().filter(|e| e.category().priority() == 2) {
                prop_assert!(seen.insert((e.dedup_title(), e.time().copied())));
            }
        }
    });
}

#[test]
fn proptest_days_sorted() {
    proptest!(|(request in request_strategy())| {
        let map = aggregate_month(&request);
        for (_, events) in map.iter() {
            let keys: Vec<_> = events.iter().map(|e| e.sort_key()).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        }
    });
}

#[test]
fn proptest_time_normalize_idempotent() {
    proptest!(|(text in "[0-9 .:apm]{0,6}")| {
        if let Some(time) = ClockTime::normalize(&text) {
            prop_assert_eq!(ClockTime::normalize(&time.to_string()), Some(time));
        }
    });
}

#[test]
fn proptest_leap_february() {
    proptest!(|(year in 1900i32..2400)| {
        let month = YearMonth::new(year, 2).unwrap();
        let map = aggregate_month(&MonthRequest::new(month));
        let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
        prop_assert_eq!(map.day_count(), if leap { 29 } else { 28 });
    });
}
