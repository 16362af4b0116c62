//! Event normalizers.
//!
//! Each submodule adapts one independently-shaped input into uniform
//! [`Event`](crate::models::Event) records (or, for activities, typed
//! requests the placement stage consumes).
//!
//! | Source | Input | Output |
//! |--------|-------|--------|
//! | `holiday` | `HolidayInput` list, bank-holiday JSON | `Holiday` events, deduplicated |
//! | `shift` | `ShiftRow` table rows | `StaffShift` events |
//! | `fixed` | `WeeklyRule`s, rule text | `Fixed` events |
//! | `activity` | `ActivityRow` table rows | `ActivityRequest`s |
//!
//! All sources degrade instead of failing: malformed rows are skipped
//! and logged.

mod activity;
mod fixed;
mod holiday;
mod shift;
mod table;
mod text;

pub use activity::{parse_frequency, ActivityRow};
pub use fixed::{fixed_events, parse_rule_lines, WeeklyRuleRow, DEFAULT_RULE_LINES};
pub use holiday::{
    awareness_days, holiday_events, parse_bank_holidays, HolidayInput, BANK_HOLIDAY_REGIONS,
};
pub use shift::{normalize_staff_name, parse_rota_date, shift_events, ShiftRow};
pub use table::{read_activity_rows, read_shift_rows};
pub use text::clean_text;
