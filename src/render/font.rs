//! Fonts and text measurement.
//!
//! The page uses the standard PDF Helvetica family, so widths come from the
//! published AFM metrics (units per 1000 em) rather than a font file.
//! Characters outside printable ASCII measure as an average glyph.

use serde::{Deserialize, Serialize};

/// Width used for characters without a metric entry.
const FALLBACK_WIDTH: u16 = 556;

/// A standard Type1 font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    /// Helvetica-Bold.
    Bold,
    /// Helvetica-Oblique.
    Oblique,
}

impl Font {
    /// Every face, in resource order.
    pub const ALL: [Font; 2] = [Font::Bold, Font::Oblique];

    /// PostScript base font name.
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
        }
    }

    /// Resource key used in page content streams.
    pub fn resource_key(self) -> &'static str {
        match self {
            Self::Bold => "F1",
            Self::Oblique => "F2",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Self::Oblique => &HELVETICA_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of one character, in 1/1000 em.
    pub fn char_width(self, c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            self.widths()[(code - 32) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }
}

/// Measures rendered text width.
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` in points at `size`.
    fn text_width(&self, text: &str, font: Font, size: f32) -> f32;
}

/// Measurement from the built-in Helvetica metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetrics;

impl TextMeasurer for StandardMetrics {
    fn text_width(&self, text: &str, font: Font, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(font.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

// Helvetica-Oblique uses the upright Helvetica widths; ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722, 667,
    611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500,
    222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667,
    611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556,
    278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
