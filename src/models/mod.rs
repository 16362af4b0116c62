//! Calendar domain models.
//!
//! Provides the value types shared by every stage: the validated month
//! handle, canonical clock times, the tagged event record, recurring
//! inputs, and the per-day map the aggregation stage fills.
//!
//! # Data Flow
//!
//! | Input | Model | Category |
//! |-------|-------|----------|
//! | Holiday feed | `Event::holiday` | Holiday |
//! | Staff rota row | `Event::staff_shift` | StaffShift |
//! | `WeeklyRule` | `Event::fixed` | Fixed |
//! | `ActivityRequest` | `Event::activity` | Activity |

mod day_map;
mod event;
mod month;
mod rule;
mod time;

pub use day_map::DayMap;
pub use event::{Category, Event, EventKind, LineStyle, ShiftHours};
pub use month::YearMonth;
pub use rule::{parse_weekday, weekday_code, ActivityRequest, WeeklyRule};
pub use time::{sort_minutes, ClockTime, END_OF_DAY_MINUTES};
