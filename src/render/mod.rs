//! Calendar page rendering.
//!
//! Lays a month out on a fixed A3 landscape canvas as a display list
//! ([`Page`]) and exports it as PDF.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Cell resolution | `cells` | computed text, replaced by overrides |
//! | Wrapping | `wrap` | character-limited, then width-fitted sub-lines |
//! | Styling | `classify` | holiday / staff / timed / plain |
//! | Layout | `layout` | [`Page`] of draw commands |
//! | Export | `pdf` | PDF bytes |
//!
//! Text is measured through [`TextMeasurer`]; [`StandardMetrics`] carries
//! the Helvetica widths used by the PDF's standard fonts.

mod cells;
mod classify;
mod font;
mod layout;
mod page;
mod pdf;
mod wrap;

pub use cells::{computed_cells, resolve_cells, CellContent, CellOverrides, CellTexts, StyledLine};
pub use classify::{classify, is_all_upper, split_time_prefix};
pub use font::{Font, StandardMetrics, TextMeasurer};
pub use layout::{
    day_slots, CalendarRenderer, GridGeometry, LayoutConfig, RenderRequest, A3_LANDSCAPE_HEIGHT,
    A3_LANDSCAPE_WIDTH, COLS, ROWS, STAFF_BLUE,
};
pub use page::{BackgroundImage, Color, DrawCommand, Page, Rect, MM};
pub use wrap::{fit_width, wrap};
