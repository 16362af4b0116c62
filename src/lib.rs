//! Monthly activity calendars for care settings.
//!
//! Merges public holidays, staff shifts, recurring weekly rules and
//! frequency-capped activities into one per-day timeline, then lays the
//! month out on a fixed A3 landscape page ready for print.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `YearMonth`, `ClockTime`, `Event`,
//!   `DayMap`, `WeeklyRule`, `ActivityRequest`
//! - **`sources`**: Per-source normalizers and CSV/JSON readers
//! - **`scheduler`**: Placement, merge/dedup and per-day ordering
//! - **`render`**: Cell resolution, fixed-canvas layout and PDF export
//! - **`config`**: TOML configuration
//! - **`validation`**: Advisory pre-flight checks
//!
//! # Example
//!
//! ```
//! use u_calendar::models::{ActivityRequest, YearMonth};
//! use u_calendar::{generate_calendar, CalendarConfig};
//!
//! let month = YearMonth::new(2025, 11).unwrap();
//! let config = CalendarConfig::default();
//! let request = config
//!     .month_request(month)
//!     .with_activities(vec![ActivityRequest::new("Bingo").with_days(["Fri"]).with_time("14:00")]);
//!
//! let (page, texts) = generate_calendar(&request, &config, None, None).unwrap();
//! assert!(page.texts().any(|t| t == "November 2025"));
//! assert_eq!(texts.get(month.first_day()).unwrap(), "18:00 Reminiscence");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod sources;
pub mod validation;

pub use config::CalendarConfig;
pub use error::{CalendarError, Result};

use tracing::info;

use render::{resolve_cells, CalendarRenderer, CellOverrides, CellTexts, Page, RenderRequest};
use scheduler::{aggregate_month, MonthRequest};

/// Aggregates and renders one month.
///
/// Returns the page and the computed per-day texts (before overrides),
/// which callers may edit and pass back as `overrides` on a later call.
///
/// # Errors
/// `CalendarError::MonthMismatch` if `overrides` is for another month.
pub fn generate_calendar(
    request: &MonthRequest,
    config: &CalendarConfig,
    overrides: Option<&CellOverrides>,
    background: Option<&[u8]>,
) -> Result<(Page, CellTexts)> {
    let map = aggregate_month(request);
    let texts = CellTexts::from_day_map(&map);
    let cells = resolve_cells(&map, overrides)?;

    let mut render = RenderRequest::new(request.month, config.title_for(request.month), &cells)
        .with_disclaimer(config.disclaimer.clone());
    if let Some(bytes) = background {
        render = render.with_background(bytes);
    }
    let page = CalendarRenderer::new(config.layout.clone()).render(&render);

    info!(
        month = %request.month,
        events = map.event_count(),
        overrides = overrides.map_or(0, CellOverrides::len),
        "Generated calendar"
    );
    Ok((page, texts))
}
