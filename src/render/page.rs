//! Page display list.
//!
//! A rendered page is its size plus an ordered list of drawing commands
//! in PDF user space: points, origin at the bottom-left corner, y up.
//! Later commands paint over earlier ones.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::font::Font;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// An RGBA colour with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Translucent colour.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// An axis-aligned rectangle; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether `other` lies entirely inside this rectangle (with tolerance).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}

/// Decoded background image (8-bit RGB, row-major, top row first).
#[derive(Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgb.len())
            .finish()
    }
}

impl BackgroundImage {
    /// Decodes PNG or JPEG bytes.
    ///
    /// Returns `None` (with a warning) when the bytes cannot be decoded;
    /// the page then renders on a blank background.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        match image::load_from_memory(bytes) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                Some(Self {
                    width: rgb.width(),
                    height: rgb.height(),
                    rgb: rgb.into_raw(),
                })
            }
            Err(e) => {
                warn!(error = %e, bytes = bytes.len(), "Unreadable background image");
                None
            }
        }
    }
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An image stretched to fill `rect`.
    Image {
        rect: Rect,
        image: Arc<BackgroundImage>,
    },
    /// A (possibly rounded) rectangle.
    Rect {
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    /// A single line of text; `(x, y)` is the baseline origin.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Color,
    },
    /// A straight stroke.
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    /// Creates an empty page.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Appends a command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Every text string on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Text commands whose baseline origin lies inside `area`.
    pub fn texts_in(&self, area: &Rect) -> Vec<&DrawCommand> {
        self.commands
            .iter()
            .filter(|c| match c {
                DrawCommand::Text { x, y, .. } => {
                    *x >= area.x && *x <= area.right() && *y >= area.y && *y <= area.top()
                }
                _ => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 60.0);
        assert!(r.contains_rect(&Rect::new(10.0, 20.0, 30.0, 40.0)));
        assert!(!r.contains_rect(&Rect::new(9.0, 20.0, 30.0, 40.0)));
    }

    #[test]
    fn test_decode_garbage_degrades() {
        let garbage: &[u8] = b"definitely not an image";
        assert!(BackgroundImage::decode(garbage).is_none());
        assert!(BackgroundImage::decode(&[]).is_none());
    }

    #[test]
    fn test_page_texts() {
        let mut page = Page::new(100.0, 100.0);
        page.push(DrawCommand::Text {
            x: 5.0,
            y: 5.0,
            text: "hello".into(),
            font: Font::Bold,
            size: 10.0,
            color: Color::BLACK,
        });
        page.push(DrawCommand::Line {
            from: (0.0, 0.0),
            to: (1.0, 1.0),
            width: 1.0,
            color: Color::BLACK,
        });
        assert_eq!(page.texts().collect::<Vec<_>>(), ["hello"]);
        assert_eq!(page.texts_in(&Rect::new(0.0, 0.0, 10.0, 10.0)).len(), 1);
        assert!(page.texts_in(&Rect::new(50.0, 50.0, 10.0, 10.0)).is_empty());
    }
}
