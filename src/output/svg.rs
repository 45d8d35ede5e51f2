//! SVG output encoder.
//!
//! Vector output keeps every label of a figure, which raster output cannot.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    Rect { x: f32, y: f32, width: f32, height: f32, fill: Rgba, stroke: Option<Rgba>, stroke_width: f32 },
    Circle { cx: f32, cy: f32, r: f32, fill: Rgba, stroke: Option<Rgba>, stroke_width: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32 },
    /// Polyline, or polygon when `fill` is set.
    Polyline { points: Vec<(f32, f32)>, stroke: Rgba, stroke_width: f32, fill: Option<Rgba> },
    /// Text, rotated clockwise by `rotation` degrees about `(x, y)`.
    Text { x: f32, y: f32, text: String, font_size: f32, fill: Rgba, anchor: TextAnchor, rotation: f32 },
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

impl TextAnchor {
    const fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

impl SvgEncoder {
    /// Create an empty document with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Append an element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Elements in document order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, rgba_to_css(bg));
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(self.render().as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

fn rgba_to_css(color: Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!("rgba({},{},{},{:.3})", color.r, color.g, color.b, f32::from(color.a) / 255.0)
    }
}

fn stroke_attr(stroke: Option<Rgba>, width: f32) -> String {
    stroke
        .map(|s| format!(r#" stroke="{}" stroke-width="{width}""#, rgba_to_css(s)))
        .unwrap_or_default()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width } => format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{}/>"#,
            rgba_to_css(*fill),
            stroke_attr(*stroke, *stroke_width)
        ),
        SvgElement::Circle { cx, cy, r, fill, stroke, stroke_width } => format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"{}/>"#,
            rgba_to_css(*fill),
            stroke_attr(*stroke, *stroke_width)
        ),
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
            rgba_to_css(*stroke)
        ),
        SvgElement::Polyline { points, stroke, stroke_width, fill } => {
            let points_str =
                points.iter().map(|(x, y)| format!("{x},{y}")).collect::<Vec<_>>().join(" ");
            let fill_attr = fill.map_or_else(|| "none".to_string(), rgba_to_css);
            let tag = if fill.is_some() { "polygon" } else { "polyline" };
            format!(
                r#"<{tag} points="{points_str}" fill="{fill_attr}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                rgba_to_css(*stroke)
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor, rotation } => {
            let transform = if rotation.abs() > f32::EPSILON {
                format!(r#" transform="rotate({rotation} {x} {y})""#)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" font-family="sans-serif"{transform}>{}</text>"#,
                rgba_to_css(*fill),
                anchor.as_str(),
                escape_xml(text)
            )
        }
    }
}
