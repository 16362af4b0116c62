//! PDF export of a rendered page.
//!
//! Writes a single-page PDF 1.5 document with `lopdf`. Text uses the
//! standard Helvetica faces (no embedding); translucent fills go through
//! one `ExtGState` per distinct alpha; the background becomes an RGB
//! image XObject stretched over the page.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use tracing::info;

use super::font::Font;
use super::page::{Color, DrawCommand, Page, Rect};
use crate::error::Result;

/// Bezier control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

impl Page {
    /// Serializes the page as PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_key(), id);
        }

        let mut writer = ContentWriter::default();
        let mut images = Dictionary::new();
        for command in &self.commands {
            if let DrawCommand::Image { rect, image } = command {
                let name = format!("Im{}", images.len());
                let id = doc.add_object(Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => i64::from(image.width),
                        "Height" => i64::from(image.height),
                        "ColorSpace" => "DeviceRGB",
                        "BitsPerComponent" => 8,
                    },
                    image.rgb.clone(),
                ));
                images.set(name.as_str(), id);
                writer.image(&name, rect);
            } else {
                writer.command(command);
            }
        }

        let mut states = Dictionary::new();
        for (name, alpha) in &writer.alphas {
            states.set(
                name.as_str(),
                dictionary! {
                    "Type" => "ExtGState",
                    "ca" => *alpha,
                    "CA" => *alpha,
                },
            );
        }

        let content = Content {
            operations: writer.ops,
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => images,
            "ExtGState" => states,
        });
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), self.width.into(), self.height.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Writes the page as a PDF file.
    pub fn save_pdf(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_pdf()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(path = %path.as_ref().display(), bytes = bytes.len(), "Wrote calendar PDF");
        Ok(())
    }
}

/// Accumulates content-stream operations.
#[derive(Default)]
struct ContentWriter {
    ops: Vec<Operation>,
    /// Graphics state names and their alpha, in first-use order.
    alphas: Vec<(String, f32)>,
}

impl ContentWriter {
    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn image(&mut self, name: &str, rect: &Rect) {
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                rect.y.into(),
            ],
        );
        self.op("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.op("Q", vec![]);
    }

    fn command(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Image { .. } => {}
            DrawCommand::Rect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                self.op("q", vec![]);
                let alpha = fill
                    .iter()
                    .chain(stroke.iter())
                    .map(|c| c.a)
                    .fold(1.0f32, f32::min);
                self.alpha(alpha);
                if let Some(c) = fill {
                    self.fill_color(c);
                }
                if let Some(c) = stroke {
                    self.stroke_color(c);
                }
                self.rect_path(rect, *radius);
                let paint = match (fill.is_some(), stroke.is_some()) {
                    (true, true) => "B",
                    (true, false) => "f",
                    (false, true) => "S",
                    (false, false) => "n",
                };
                self.op(paint, vec![]);
                self.op("Q", vec![]);
            }
            DrawCommand::Text {
                x,
                y,
                text,
                font,
                size,
                color,
            } => {
                self.op("q", vec![]);
                self.alpha(color.a);
                self.fill_color(color);
                self.op("BT", vec![]);
                self.op("Tf", vec![font.resource_key().into(), (*size).into()]);
                self.op("Td", vec![(*x).into(), (*y).into()]);
                self.op("Tj", vec![Object::string_literal(text.as_str())]);
                self.op("ET", vec![]);
                self.op("Q", vec![]);
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                self.op("q", vec![]);
                self.alpha(color.a);
                self.stroke_color(color);
                self.op("w", vec![(*width).into()]);
                self.op("m", vec![from.0.into(), from.1.into()]);
                self.op("l", vec![to.0.into(), to.1.into()]);
                self.op("S", vec![]);
                self.op("Q", vec![]);
            }
        }
    }

    fn alpha(&mut self, alpha: f32) {
        if alpha >= 1.0 {
            return;
        }
        let name = match self.alphas.iter().find(|(_, a)| (*a - alpha).abs() < 1e-4) {
            Some((name, _)) => name.clone(),
            None => {
                let name = format!("GS{}", self.alphas.len());
                self.alphas.push((name.clone(), alpha));
                name
            }
        };
        self.op("gs", vec![Object::Name(name.into_bytes())]);
    }

    fn fill_color(&mut self, c: &Color) {
        self.op("rg", vec![c.r.into(), c.g.into(), c.b.into()]);
    }

    fn stroke_color(&mut self, c: &Color) {
        self.op("RG", vec![c.r.into(), c.g.into(), c.b.into()]);
    }

    fn rect_path(&mut self, rect: &Rect, radius: f32) {
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        if r == 0.0 {
            self.op(
                "re",
                vec![
                    rect.x.into(),
                    rect.y.into(),
                    rect.width.into(),
                    rect.height.into(),
                ],
            );
            return;
        }

        let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.top());
        let k = r * KAPPA;
        self.op("m", vec![(x0 + r).into(), y0.into()]);
        self.op("l", vec![(x1 - r).into(), y0.into()]);
        self.curve((x1 - r + k, y0), (x1, y0 + r - k), (x1, y0 + r));
        self.op("l", vec![x1.into(), (y1 - r).into()]);
        self.curve((x1, y1 - r + k), (x1 - r + k, y1), (x1 - r, y1));
        self.op("l", vec![(x0 + r).into(), y1.into()]);
        self.curve((x0 + r - k, y1), (x0, y1 - r + k), (x0, y1 - r));
        self.op("l", vec![x0.into(), (y0 + r).into()]);
        self.curve((x0, y0 + r - k), (x0 + r - k, y0), (x0 + r, y0));
        self.op("h", vec![]);
    }

    fn curve(&mut self, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
        self.op(
            "c",
            vec![
                c1.0.into(),
                c1.1.into(),
                c2.0.into(),
                c2.1.into(),
                end.0.into(),
                end.1.into(),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::render::page::BackgroundImage;

    fn sample_page() -> Page {
        let mut page = Page::new(200.0, 100.0);
        page.push(DrawCommand::Rect {
            rect: Rect::new(10.0, 10.0, 50.0, 30.0),
            radius: 5.0,
            fill: Some(Color::rgba(1.0, 1.0, 1.0, 0.93)),
            stroke: Some(Color::BLACK),
        });
        page.push(DrawCommand::Text {
            x: 12.0,
            y: 20.0,
            text: "18:00 Film Night".into(),
            font: Font::Bold,
            size: 10.5,
            color: Color::BLACK,
        });
        page
    }

    #[test]
    fn test_pdf_header_and_reload() {
        let bytes = sample_page().to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_pdf_contains_text() {
        let bytes = sample_page().to_pdf().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let content = doc.get_and_decode_page_content(page_id).unwrap();
        let shown: Vec<_> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|o| o.as_str().ok())
            .collect();
        assert_eq!(shown, vec![b"18:00 Film Night".as_slice()]);
    }

    #[test]
    fn test_alpha_states_shared() {
        let mut writer = ContentWriter::default();
        writer.alpha(0.5);
        writer.alpha(0.5);
        writer.alpha(0.75);
        writer.alpha(1.0);
        assert_eq!(writer.alphas.len(), 2);
        assert_eq!(writer.ops.len(), 3);
    }

    #[test]
    fn test_image_xobject() {
        let mut page = Page::new(100.0, 100.0);
        page.push(DrawCommand::Image {
            rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            image: Arc::new(BackgroundImage {
                width: 2,
                height: 1,
                rgb: vec![255, 0, 0, 0, 0, 255],
            }),
        });
        let bytes = page.to_pdf().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let has_image = doc.objects.values().any(|o| {
            o.as_stream()
                .ok()
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|n| n.as_name().ok())
                == Some(b"Image".as_slice())
        });
        assert!(has_image);
    }
}
