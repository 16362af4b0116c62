//! Month aggregation pipeline.
//!
//! # Algorithm
//!
//! 1. Build the empty day map for the month.
//! 2. Insert holidays (when enabled) and staff shifts directly; both are
//!    deduplicated at source or not comparable by title.
//! 3. Expand weekly rules and place activities independently.
//! 4. Merge rule events, then activity events, under the merge policy.
//! 5. Sort each day by category priority, then time.
//!
//! Each run is a pure function of its request; identical requests give
//! identical maps.

use tracing::debug;

use crate::models::{ActivityRequest, DayMap, WeeklyRule, YearMonth};
use crate::sources::{
    fixed_events, holiday_events, shift_events, ActivityRow, HolidayInput, ShiftRow, WeeklyRuleRow,
};

use super::merge::{merge_events, sort_day_map};
use super::placement::place_activities;

/// Input container for one month's aggregation.
#[derive(Debug, Clone)]
pub struct MonthRequest {
    /// Target month.
    pub month: YearMonth,
    /// Holidays from external providers (any month; filtered here).
    pub holidays: Vec<HolidayInput>,
    /// Raw staff rota rows.
    pub shift_rows: Vec<ShiftRow>,
    /// Activity requests.
    pub activities: Vec<ActivityRequest>,
    /// Weekly rules.
    pub weekly_rules: Vec<WeeklyRule>,
    /// When false, holidays are skipped entirely.
    pub include_holidays: bool,
}

impl MonthRequest {
    /// Creates an empty request with holidays enabled.
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            holidays: Vec::new(),
            shift_rows: Vec::new(),
            activities: Vec::new(),
            weekly_rules: Vec::new(),
            include_holidays: true,
        }
    }

    /// Sets holiday inputs.
    pub fn with_holidays(mut self, holidays: Vec<HolidayInput>) -> Self {
        self.holidays = holidays;
        self
    }

    /// Sets staff rota rows.
    pub fn with_shift_rows(mut self, rows: Vec<ShiftRow>) -> Self {
        self.shift_rows = rows;
        self
    }

    /// Sets typed activity requests.
    pub fn with_activities(mut self, activities: Vec<ActivityRequest>) -> Self {
        self.activities = activities;
        self
    }

    /// Sets activity requests from raw table rows.
    pub fn with_activity_rows(mut self, rows: &[ActivityRow]) -> Self {
        self.activities = rows.iter().map(ActivityRow::to_request).collect();
        self
    }

    /// Sets typed weekly rules.
    pub fn with_weekly_rules(mut self, rules: Vec<WeeklyRule>) -> Self {
        self.weekly_rules = rules;
        self
    }

    /// Sets weekly rules from rows with day names; unknown days are skipped.
    pub fn with_rule_rows(mut self, rows: &[WeeklyRuleRow]) -> Self {
        self.weekly_rules = rows.iter().filter_map(WeeklyRuleRow::to_rule).collect();
        self
    }

    /// Enables or disables holiday aggregation.
    pub fn with_include_holidays(mut self, include: bool) -> Self {
        self.include_holidays = include;
        self
    }
}

/// Aggregates every source into one ordered day map.
///
/// # Example
///
/// ```
/// use u_calendar::models::{ActivityRequest, YearMonth};
/// use u_calendar::scheduler::{aggregate_month, MonthRequest};
/// use u_calendar::sources::{parse_rule_lines, ShiftRow};
///
/// let month = YearMonth::new(2025, 11).unwrap();
/// let request = MonthRequest::new(month)
///     .with_shift_rows(vec![ShiftRow::new("2025-11-06", "Lucy", "09:00", "16:30")])
///     .with_weekly_rules(parse_rule_lines("Film Night:Thu:18:00"))
///     .with_activities(vec![ActivityRequest::new("Quiz").with_days(["Thu"]).with_frequency(1)]);
///
/// let map = aggregate_month(&request);
/// assert_eq!(map.day_count(), 30);
///
/// let thursday = map.events("2025-11-06".parse().unwrap()).unwrap();
/// let lines: Vec<_> = thursday.iter().map(|e| e.display_line()).collect();
/// assert_eq!(lines, ["Staff: Lucy (09:00 \u{2013} 16:30)", "18:00 Film Night", "Quiz"]);
/// ```
pub fn aggregate_month(request: &MonthRequest) -> DayMap {
    let month = request.month;
    let mut map = DayMap::new(month);

    if request.include_holidays {
        for event in holiday_events(month, &request.holidays) {
            map.push(event);
        }
    }
    for event in shift_events(month, &request.shift_rows) {
        map.push(event);
    }

    let fixed = fixed_events(month, &request.weekly_rules);
    let activities = place_activities(month, &request.activities);
    let candidates = fixed.len() + activities.len();

    let inserted = merge_events(&mut map, fixed.into_iter().chain(activities));
    sort_day_map(&mut map);

    debug!(
        month = %month,
        events = map.event_count(),
        candidates,
        inserted,
        "Aggregated month"
    );
    map
}
