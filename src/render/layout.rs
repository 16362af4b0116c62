//! Fixed-canvas month layout.
//!
//! Paints one landscape A3 page in a fixed order: background, header
//! pill with title and disclaimer, weekday bar, then the 5×7 day grid.
//!
//! # Algorithm
//!
//! Each day cell holds a cursor that starts just below the cell's top
//! edge and moves down one line pitch per drawn sub-line. Logical lines
//! are wrapped by character count, then split again if their measured
//! width still exceeds the cell. Before each sub-line is drawn the cursor
//! is checked against the cell's bottom budget; once it falls below,
//! the rest of the cell's text is dropped silently.
//!
//! Months spanning six weeks fold their last week into the empty leading
//! cells of the first row, so the grid stays 5 rows tall.
//!
//! # Geometry
//!
//! | Element | Placement |
//! |---------|-----------|
//! | Margins | left/right 4mm, top 37mm, bottom 1mm |
//! | Weekday bar | 8mm tall, 6mm above the top margin line |
//! | Grid | 1.5mm below the bar down to the bottom margin |
//! | Header pill | 15mm tall, base 16mm below the page top |

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cells::CellContent;
use super::classify::split_time_prefix;
use super::font::{Font, StandardMetrics, TextMeasurer};
use super::page::{BackgroundImage, Color, DrawCommand, Page, Rect, MM};
use super::wrap::{fit_width, wrap};
use crate::models::{LineStyle, YearMonth};
use crate::sources::clean_text;

/// Landscape A3 width in points.
pub const A3_LANDSCAPE_WIDTH: f32 = 420.0 * MM;
/// Landscape A3 height in points.
pub const A3_LANDSCAPE_HEIGHT: f32 = 297.0 * MM;

/// Grid rows.
pub const ROWS: usize = 5;
/// Grid columns, Monday first.
pub const COLS: usize = 7;

const WEEKDAY_LABELS: [&str; COLS] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Staff line colour.
pub const STAFF_BLUE: Color = Color::rgb(0.0, 0.298, 0.6);
const CELL_FILL: Color = Color::rgba(1.0, 1.0, 1.0, 0.93);
const BAR_FILL: Color = Color::rgba(0.0, 0.0, 0.0, 0.85);
const PILL_FILL: Color = Color::rgba(0.0, 0.0, 0.0, 0.75);

/// Page geometry, type sizes and wrap limits.
///
/// Lengths ending in `_mm` are millimetres; type sizes are points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    /// Characters per wrapped sub-line.
    pub wrap_width: usize,
    /// Characters per holiday sub-line.
    pub holiday_wrap_width: usize,
    pub line_spacing_mm: f32,
    pub title_size: f32,
    pub disclaimer_size: f32,
    pub weekday_size: f32,
    pub day_number_size: f32,
    pub text_size: f32,
    pub holiday_size: f32,
    /// Header pill side padding as a share of the title width.
    pub pill_padding_ratio: f32,
    pub cell_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: A3_LANDSCAPE_WIDTH,
            page_height: A3_LANDSCAPE_HEIGHT,
            margin_left_mm: 4.0,
            margin_right_mm: 4.0,
            margin_top_mm: 37.0,
            margin_bottom_mm: 1.0,
            wrap_width: 31,
            holiday_wrap_width: 28,
            line_spacing_mm: 4.0,
            title_size: 30.0,
            disclaimer_size: 12.0,
            weekday_size: 15.0,
            day_number_size: 12.0,
            text_size: 10.5,
            holiday_size: 8.7,
            pill_padding_ratio: 0.35,
            cell_radius: 5.0,
        }
    }
}

/// Resolved grid placement for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub left: f32,
    pub bottom: f32,
    pub col_width: f32,
    pub row_height: f32,
    pub bar_y: f32,
    pub bar_height: f32,
}

impl GridGeometry {
    /// Computes the grid for a page and configuration.
    pub fn new(config: &LayoutConfig) -> Self {
        let left = config.margin_left_mm * MM;
        let right = config.margin_right_mm * MM;
        let bottom = config.margin_bottom_mm * MM;
        let bar_y = config.page_height - config.margin_top_mm * MM + 6.0 * MM;
        let top_of_grid = bar_y - 1.5 * MM;
        Self {
            left,
            bottom,
            col_width: (config.page_width - left - right) / COLS as f32,
            row_height: (top_of_grid - bottom) / ROWS as f32,
            bar_y,
            bar_height: 8.0 * MM,
        }
    }

    /// Full grid width.
    pub fn width(&self) -> f32 {
        self.col_width * COLS as f32
    }

    /// Box of the cell at `row` (0 = top) and `col` (0 = Monday).
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.left + col as f32 * self.col_width,
            self.bottom + (ROWS - 1 - row) as f32 * self.row_height,
            self.col_width,
            self.row_height,
        )
    }
}

/// Grid slot of every day of the month, as `(row, col)`.
///
/// Days of a sixth week take the matching column in the first row.
pub fn day_slots(month: YearMonth) -> Vec<(u32, usize, usize)> {
    let mut slots = Vec::with_capacity(month.day_count() as usize);
    for (week_idx, week) in month.weeks().iter().enumerate() {
        let row = if week_idx >= ROWS { 0 } else { week_idx };
        for (col, day) in week.iter().enumerate() {
            if let Some(day) = day {
                slots.push((*day, row, col));
            }
        }
    }
    slots
}

/// Inputs for one render call.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub month: YearMonth,
    pub title: String,
    pub disclaimer: String,
    pub cells: &'a BTreeMap<NaiveDate, CellContent>,
    /// Encoded PNG or JPEG bytes; undecodable bytes render blank.
    pub background: Option<&'a [u8]>,
}

impl<'a> RenderRequest<'a> {
    /// Creates a request with an empty disclaimer and no background.
    pub fn new(
        month: YearMonth,
        title: impl Into<String>,
        cells: &'a BTreeMap<NaiveDate, CellContent>,
    ) -> Self {
        Self {
            month,
            title: title.into(),
            disclaimer: String::new(),
            cells,
            background: None,
        }
    }

    /// Sets the disclaimer line.
    pub fn with_disclaimer(mut self, disclaimer: impl Into<String>) -> Self {
        self.disclaimer = disclaimer.into();
        self
    }

    /// Sets background image bytes.
    pub fn with_background(mut self, bytes: &'a [u8]) -> Self {
        self.background = Some(bytes);
        self
    }
}

/// Lays out a month onto a page.
///
/// # Example
///
/// ```
/// use u_calendar::models::{DayMap, YearMonth};
/// use u_calendar::render::{resolve_cells, CalendarRenderer, RenderRequest};
///
/// let month = YearMonth::new(2025, 11).unwrap();
/// let cells = resolve_cells(&DayMap::new(month), None).unwrap();
/// let request = RenderRequest::new(month, "November 2025", &cells);
/// let page = CalendarRenderer::default().render(&request);
/// assert!(page.texts().any(|t| t == "30"));
/// ```
#[derive(Clone)]
pub struct CalendarRenderer {
    config: LayoutConfig,
    measurer: Arc<dyn TextMeasurer>,
}

impl Default for CalendarRenderer {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl std::fmt::Debug for CalendarRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CalendarRenderer {
    /// Creates a renderer measuring with the standard font metrics.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            measurer: Arc::new(StandardMetrics),
        }
    }

    /// Replaces the text measurer.
    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Layout configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Grid placement under this renderer's configuration.
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(&self.config)
    }

    /// Renders one month. Never fails; overflowing text is dropped.
    pub fn render(&self, request: &RenderRequest<'_>) -> Page {
        let cfg = &self.config;
        let mut page = Page::new(cfg.page_width, cfg.page_height);

        if let Some(image) = request.background.and_then(BackgroundImage::decode) {
            page.push(DrawCommand::Image {
                rect: Rect::new(0.0, 0.0, cfg.page_width, cfg.page_height),
                image: Arc::new(image),
            });
        }

        let title = clean_text(&request.title);
        let disclaimer = clean_text(&request.disclaimer);
        self.draw_header(&mut page, &title, &disclaimer);

        let grid = self.geometry();
        self.draw_weekday_bar(&mut page, &grid);

        let mut dropped = 0usize;
        for (day, row, col) in day_slots(request.month) {
            let rect = grid.cell_rect(row, col);
            let content = request
                .month
                .first_day()
                .with_day(day)
                .and_then(|d| request.cells.get(&d));
            dropped += self.draw_cell(&mut page, rect, day, content);
        }

        debug!(
            month = %request.month,
            commands = page.commands.len(),
            dropped,
            "Rendered calendar page"
        );
        page
    }

    fn width(&self, text: &str, font: Font, size: f32) -> f32 {
        self.measurer.text_width(text, font, size)
    }

    fn draw_header(&self, page: &mut Page, title: &str, disclaimer: &str) {
        let cfg = &self.config;
        let center = cfg.page_width / 2.0;

        let title_w = self.width(title, Font::Bold, cfg.title_size);
        let padding = (20.0 * MM).max(title_w * cfg.pill_padding_ratio);
        let pill_w = title_w + padding;
        let pill_h = 15.0 * MM;
        let pill_y = cfg.page_height - 16.0 * MM;

        page.push(DrawCommand::Rect {
            rect: Rect::new(center - pill_w / 2.0, pill_y, pill_w, pill_h),
            radius: 8.0 * MM,
            fill: Some(PILL_FILL),
            stroke: None,
        });
        page.push(DrawCommand::Text {
            x: center - title_w / 2.0,
            y: pill_y + 4.0 * MM,
            text: title.to_string(),
            font: Font::Bold,
            size: cfg.title_size,
            color: Color::WHITE,
        });

        if !disclaimer.is_empty() {
            let w = self.width(disclaimer, Font::Bold, cfg.disclaimer_size);
            page.push(DrawCommand::Text {
                x: center - w / 2.0,
                y: pill_y - 5.0 * MM,
                text: disclaimer.to_string(),
                font: Font::Bold,
                size: cfg.disclaimer_size,
                color: Color::BLACK,
            });
        }
    }

    fn draw_weekday_bar(&self, page: &mut Page, grid: &GridGeometry) {
        let size = self.config.weekday_size;
        page.push(DrawCommand::Rect {
            rect: Rect::new(grid.left, grid.bar_y, grid.width(), grid.bar_height),
            radius: 0.0,
            fill: Some(BAR_FILL),
            stroke: None,
        });
        for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
            let center = grid.left + i as f32 * grid.col_width + grid.col_width / 2.0;
            page.push(DrawCommand::Text {
                x: center - self.width(label, Font::Bold, size) / 2.0,
                y: grid.bar_y + 2.5 * MM,
                text: (*label).to_string(),
                font: Font::Bold,
                size,
                color: Color::WHITE,
            });
        }
    }

    /// Draws one day cell; returns how many sub-lines were dropped.
    fn draw_cell(
        &self,
        page: &mut Page,
        rect: Rect,
        day: u32,
        content: Option<&CellContent>,
    ) -> usize {
        let cfg = &self.config;

        page.push(DrawCommand::Rect {
            rect,
            radius: cfg.cell_radius,
            fill: Some(CELL_FILL),
            stroke: Some(Color::BLACK),
        });

        let label = day.to_string();
        let label_w = self.width(&label, Font::Bold, cfg.day_number_size);
        page.push(DrawCommand::Text {
            x: rect.right() - label_w - 3.0 * MM,
            y: rect.top() - 6.0 * MM,
            text: label,
            font: Font::Bold,
            size: cfg.day_number_size,
            color: Color::BLACK,
        });

        let Some(content) = content else {
            return 0;
        };

        let mut cursor = CellCursor {
            x: rect.x + 2.0 * MM,
            max_w: rect.width - 4.0 * MM,
            y: rect.top() - 6.0 * MM,
            floor: rect.y + 4.0 * MM,
            spacing: cfg.line_spacing_mm * MM,
        };

        let pieces = content.sub_lines(cfg.wrap_width);
        let total = pieces.len();
        for (drawn, line) in pieces.into_iter().enumerate() {
            let ok = match line.style {
                LineStyle::Holiday => self.draw_holiday(page, &mut cursor, &line.text),
                LineStyle::Staff => {
                    self.draw_simple(page, &mut cursor, &line.text, Font::Oblique, STAFF_BLUE)
                }
                LineStyle::Timed => self.draw_timed(page, &mut cursor, &line.text),
                LineStyle::Plain => {
                    self.draw_simple(page, &mut cursor, &line.text, Font::Bold, Color::BLACK)
                }
            };
            if !ok {
                return total - drawn;
            }
        }
        0
    }

    fn draw_holiday(&self, page: &mut Page, cursor: &mut CellCursor, text: &str) -> bool {
        let size = self.config.holiday_size;
        let x = cursor.x;
        for piece in wrap(text, self.config.holiday_wrap_width) {
            for fitted in fit_width(&piece, cursor.max_w, |s| self.width(s, Font::Bold, size)) {
                let Some(y) = cursor.take() else {
                    return false;
                };
                let w = self.width(&fitted, Font::Bold, size);
                page.push(DrawCommand::Text {
                    x,
                    y,
                    text: fitted,
                    font: Font::Bold,
                    size,
                    color: Color::BLACK,
                });
                page.push(DrawCommand::Line {
                    from: (x, y - 0.5 * MM),
                    to: (x + w, y - 0.5 * MM),
                    width: 1.0,
                    color: Color::BLACK,
                });
            }
        }
        true
    }

    fn draw_simple(
        &self,
        page: &mut Page,
        cursor: &mut CellCursor,
        text: &str,
        font: Font,
        color: Color,
    ) -> bool {
        let size = self.config.text_size;
        for fitted in fit_width(text, cursor.max_w, |s| self.width(s, font, size)) {
            let Some(y) = cursor.take() else {
                return false;
            };
            page.push(DrawCommand::Text {
                x: cursor.x,
                y,
                text: fitted,
                font,
                size,
                color,
            });
        }
        true
    }

    fn draw_timed(&self, page: &mut Page, cursor: &mut CellCursor, text: &str) -> bool {
        let size = self.config.text_size;
        let Some((time, rest)) = split_time_prefix(text) else {
            return self.draw_simple(page, cursor, text, Font::Bold, Color::BLACK);
        };

        let offset = self.width(&format!("{time} "), Font::Bold, size);
        let rest_w = (cursor.max_w - offset).max(0.0);
        let pieces = fit_width(rest, rest_w, |s| self.width(s, Font::Bold, size));

        let Some(y) = cursor.take() else {
            return false;
        };
        page.push(DrawCommand::Text {
            x: cursor.x,
            y,
            text: time.to_string(),
            font: Font::Bold,
            size,
            color: Color::BLACK,
        });

        let Some((first, remainder)) = pieces.split_first() else {
            return true;
        };
        page.push(DrawCommand::Text {
            x: cursor.x + offset,
            y,
            text: first.clone(),
            font: Font::Bold,
            size,
            color: Color::BLACK,
        });
        if remainder.is_empty() {
            return true;
        }
        let remainder = remainder.join(" ");
        self.draw_simple(page, cursor, &remainder, Font::Bold, Color::BLACK)
    }
}

/// Text cursor inside one cell: a fixed left edge and width, moving down.
struct CellCursor {
    x: f32,
    max_w: f32,
    y: f32,
    floor: f32,
    spacing: f32,
}

impl CellCursor {
    /// Baseline for the next line, or `None` once the budget is spent.
    fn take(&mut self) -> Option<f32> {
        if self.y < self.floor {
            return None;
        }
        let y = self.y;
        self.y -= self.spacing;
        Some(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cells::StyledLine;

    fn nov() -> YearMonth {
        YearMonth::new(2025, 11).unwrap()
    }

    fn text_commands(page: &Page) -> Vec<(f32, f32, &str, Font, Color)> {
        page.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font,
                    color,
                    ..
                } => Some((*x, *y, text.as_str(), *font, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_geometry_matches_a3() {
        let grid = GridGeometry::new(&LayoutConfig::default());
        assert!((A3_LANDSCAPE_WIDTH - 1190.55).abs() < 0.01);
        assert!((grid.left - 4.0 * MM).abs() < 1e-3);
        let grid_w = A3_LANDSCAPE_WIDTH - 8.0 * MM;
        assert!((grid.width() - grid_w).abs() < 1e-2);
        // Top of grid sits 1.5mm below the bar.
        let top = grid.cell_rect(0, 0).top();
        assert!((grid.bar_y - top - 1.5 * MM).abs() < 1e-2);
        assert!((grid.cell_rect(4, 0).y - grid.bottom).abs() < 1e-3);
    }

    #[test]
    fn test_day_slots_november_2025() {
        // Nov 1 2025 is a Saturday.
        let slots = day_slots(nov());
        assert_eq!(slots.len(), 30);
        assert_eq!(slots[0], (1, 0, 5));
        assert_eq!(slots[29], (30, 4, 6));
    }

    #[test]
    fn test_six_week_month_folds_into_first_row() {
        // Mar 2026 starts on a Sunday and needs six weeks.
        let month = YearMonth::new(2026, 3).unwrap();
        assert_eq!(month.weeks().len(), 6);
        let slots = day_slots(month);
        assert_eq!(slots.len(), 31);
        assert!(slots.iter().all(|(_, row, _)| *row < ROWS));
        assert!(slots.contains(&(30, 0, 0)));
        assert!(slots.contains(&(31, 0, 1)));
        assert!(slots.contains(&(1, 0, 6)));

        let mut taken = std::collections::HashSet::new();
        assert!(slots.iter().all(|(_, r, c)| taken.insert((*r, *c))));
    }

    #[test]
    fn test_render_header_and_bar() {
        let cells = BTreeMap::new();
        let request = RenderRequest::new(nov(), "November 2025", &cells)
            .with_disclaimer("Subject to change");
        let page = CalendarRenderer::default().render(&request);
        let texts: Vec<_> = page.texts().collect();
        assert_eq!(texts[0], "November 2025");
        assert_eq!(texts[1], "Subject to change");
        assert_eq!(&texts[2..9], &WEEKDAY_LABELS);
        assert!(texts.contains(&"1") && texts.contains(&"30"));
        assert!(!texts.contains(&"31"));
    }

    #[test]
    fn test_styles_drawn() {
        let mut cells = BTreeMap::new();
        let d = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        cells.insert(
            d,
            CellContent::Computed(vec![
                StyledLine::new("BONFIRE NIGHT (UK)", LineStyle::Holiday),
                StyledLine::new("Staff: Lucy", LineStyle::Staff),
                StyledLine::new("18:00 Film Night", LineStyle::Timed),
            ]),
        );
        let renderer = CalendarRenderer::default();
        let page = renderer.render(&RenderRequest::new(nov(), "Nov", &cells));
        let texts = text_commands(&page);

        let holiday = texts.iter().find(|t| t.2 == "BONFIRE NIGHT (UK)").unwrap();
        assert_eq!(holiday.3, Font::Bold);
        let underline_y = holiday.1 - 0.5 * MM;
        let underline = page.commands.iter().any(|c| match c {
            DrawCommand::Line { from, .. } => (from.1 - underline_y).abs() < 1e-3,
            _ => false,
        });
        assert!(underline);

        let staff = texts.iter().find(|t| t.2 == "Staff: Lucy").unwrap();
        assert_eq!((staff.3, staff.4), (Font::Oblique, STAFF_BLUE));

        let time = texts.iter().find(|t| t.2 == "18:00").unwrap();
        let rest = texts.iter().find(|t| t.2 == "Film Night").unwrap();
        assert_eq!(time.1, rest.1);
        let offset = StandardMetrics.text_width("18:00 ", Font::Bold, 10.5);
        assert!((rest.0 - time.0 - offset).abs() < 1e-3);
        assert!(holiday.1 > staff.1 && staff.1 > time.1);
    }

    #[test]
    fn test_truncation_stays_inside_cell() {
        let d = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
        let lines = (0..40)
            .map(|i| format!("{:02}:00 Activity number {i}", i % 24))
            .map(|text| StyledLine::new(text, LineStyle::Timed))
            .collect();
        let mut cells = BTreeMap::new();
        cells.insert(d, CellContent::Computed(lines));

        let renderer = CalendarRenderer::default();
        let page = renderer.render(&RenderRequest::new(nov(), "Nov", &cells));

        let (_, row, col) = day_slots(nov())
            .into_iter()
            .find(|(day, _, _)| *day == 12)
            .unwrap();
        let rect = renderer.geometry().cell_rect(row, col);
        let inside = page.texts_in(&rect);
        // Day number plus the lines that fit; far fewer than 40.
        assert!(inside.len() > 5 && inside.len() < 40);
        for cmd in inside {
            if let DrawCommand::Text { y, .. } = cmd {
                assert!(*y >= rect.y + 4.0 * MM - 1e-3);
            }
        }
        assert!(!page.texts().any(|t| t == "Activity number 39"));
    }

    #[test]
    fn test_wide_text_fits_cell_width() {
        let d = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let mut cells = BTreeMap::new();
        let text = "W".repeat(31);
        cells.insert(d, CellContent::Override(text));
        let renderer = CalendarRenderer::default();
        let page = renderer.render(&RenderRequest::new(nov(), "Nov", &cells));
        let rect = renderer.geometry().cell_rect(1, 0);
        for cmd in page.texts_in(&rect) {
            if let DrawCommand::Text {
                x,
                text,
                font,
                size,
                ..
            } = cmd
            {
                let w = StandardMetrics.text_width(text, *font, *size);
                assert!(x + w <= rect.right() + 1e-3, "{text} overflows");
            }
        }
    }

    #[test]
    fn test_bad_background_renders_blank() {
        let cells = BTreeMap::new();
        let request = RenderRequest::new(nov(), "Nov", &cells).with_background(b"nope");
        let page = CalendarRenderer::default().render(&request);
        let has_image = page
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. }));
        assert!(!has_image);
    }
}
