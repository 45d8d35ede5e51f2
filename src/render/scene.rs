//! Retained display list shared by every output format.
//!
//! Plot builders emit a [`Scene`]; backends rasterize it or serialize it to SVG.
//! Raster output carries no glyphs, so text only appears in vector output.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output::{SvgElement, SvgEncoder, TextAnchor};

use super::primitives::{
    draw_circle, draw_circle_outline, draw_polyline, draw_rect, draw_rect_outline,
    draw_thick_line, fill_polygon,
};

/// Stroke color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Rgba,
    /// Line width in pixels.
    pub width: f32,
}

impl Stroke {
    /// Create a stroke.
    #[must_use]
    pub const fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Anchor position.
    pub position: Point,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    pub size: f32,
    /// Text color.
    pub color: Rgba,
    /// Horizontal alignment relative to `position`.
    pub anchor: TextAnchor,
    /// Clockwise rotation in degrees about `position`.
    pub rotation: f32,
}

impl Label {
    /// Create a start-anchored, unrotated label.
    pub fn new(position: Point, text: impl Into<String>, size: f32, color: Rgba) -> Self {
        Self { position, text: text.into(), size, color, anchor: TextAnchor::Start, rotation: 0.0 }
    }

    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// A drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect {
        /// Bounds.
        rect: Rect,
        /// Fill color.
        fill: Rgba,
        /// Optional border.
        stroke: Option<Stroke>,
    },
    /// Straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke.
        stroke: Stroke,
    },
    /// Open path through points.
    Polyline {
        /// Vertices.
        points: Vec<Point>,
        /// Stroke.
        stroke: Stroke,
    },
    /// Closed filled polygon.
    Polygon {
        /// Vertices.
        points: Vec<Point>,
        /// Fill color.
        fill: Rgba,
        /// Optional border.
        stroke: Option<Stroke>,
    },
    /// Filled circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        fill: Rgba,
        /// Optional border.
        stroke: Option<Stroke>,
    },
    /// Text label.
    Text(Label),
}

/// An ordered list of shapes on a fixed-size canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    background: Rgba,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self { width, height, background, shapes: Vec::new() }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Background color.
    #[must_use]
    pub const fn background(&self) -> Rgba {
        self.background
    }

    /// Shapes in paint order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Append a shape.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Append a filled rectangle.
    pub fn rect(&mut self, rect: Rect, fill: Rgba, stroke: Option<Stroke>) {
        self.push(Shape::Rect { rect, fill, stroke });
    }

    /// Append a line segment.
    pub fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.push(Shape::Line { from, to, stroke });
    }

    /// Append a label.
    pub fn text(&mut self, label: Label) {
        self.push(Shape::Text(label));
    }

    /// All text labels in paint order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text(label) => Some(label),
            _ => None,
        })
    }

    /// Whether any label has exactly this text.
    #[must_use]
    pub fn has_text(&self, text: &str) -> bool {
        self.labels().any(|l| l.text == text)
    }

    /// Rasterize into a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas has zero width or height.
    pub fn rasterize(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.background);

        for shape in &self.shapes {
            match shape {
                Shape::Rect { rect, fill, stroke } => {
                    draw_rect(&mut fb, *rect, *fill);
                    if let Some(s) = stroke {
                        draw_rect_outline(&mut fb, *rect, s.width, s.color);
                    }
                }
                Shape::Line { from, to, stroke } => {
                    draw_thick_line(&mut fb, *from, *to, stroke.width, stroke.color);
                }
                Shape::Polyline { points, stroke } => {
                    draw_polyline(&mut fb, points, stroke.width, stroke.color);
                }
                Shape::Polygon { points, fill, stroke } => {
                    fill_polygon(&mut fb, points, *fill);
                    if let Some(s) = stroke {
                        let mut closed = points.clone();
                        if let Some(first) = points.first() {
                            closed.push(*first);
                        }
                        draw_polyline(&mut fb, &closed, s.width, s.color);
                    }
                }
                Shape::Circle { center, radius, fill, stroke } => {
                    let (cx, cy, r) = (center.x.round() as i32, center.y.round() as i32, radius.round() as i32);
                    draw_circle(&mut fb, cx, cy, r, *fill);
                    if let Some(s) = stroke {
                        draw_circle_outline(&mut fb, cx, cy, r, s.color);
                    }
                }
                Shape::Text(_) => {}
            }
        }

        Ok(fb)
    }

    /// Convert to a vector SVG document.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let mut svg = SvgEncoder::new(self.width, self.height).background(Some(self.background));
        for shape in &self.shapes {
            svg.add_element(shape_to_element(shape));
        }
        svg
    }
}

fn shape_to_element(shape: &Shape) -> SvgElement {
    match shape {
        Shape::Rect { rect, fill, stroke } => SvgElement::Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            fill: *fill,
            stroke: stroke.map(|s| s.color),
            stroke_width: stroke.map_or(0.0, |s| s.width),
        },
        Shape::Line { from, to, stroke } => SvgElement::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke: stroke.color,
            stroke_width: stroke.width,
        },
        Shape::Polyline { points, stroke } => SvgElement::Polyline {
            points: points.iter().map(|p| (p.x, p.y)).collect(),
            stroke: stroke.color,
            stroke_width: stroke.width,
            fill: None,
        },
        Shape::Polygon { points, fill, stroke } => SvgElement::Polyline {
            points: points.iter().map(|p| (p.x, p.y)).collect(),
            stroke: stroke.map_or(*fill, |s| s.color),
            stroke_width: stroke.map_or(0.0, |s| s.width),
            fill: Some(*fill),
        },
        Shape::Circle { center, radius, fill, stroke } => SvgElement::Circle {
            cx: center.x,
            cy: center.y,
            r: *radius,
            fill: *fill,
            stroke: stroke.map(|s| s.color),
            stroke_width: stroke.map_or(0.0, |s| s.width),
        },
        Shape::Text(label) => SvgElement::Text {
            x: label.position.x,
            y: label.position.y,
            text: label.text.clone(),
            font_size: label.size,
            fill: label.color,
            anchor: label.anchor,
            rotation: label.rotation,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scene {
        let mut scene = Scene::new(120, 80, Rgba::WHITE);
        scene.rect(Rect::new(10.0, 10.0, 40.0, 40.0), Rgba::RED, None);
        scene.line(Point::new(0.0, 70.0), Point::new(119.0, 70.0), Stroke::new(Rgba::BLACK, 2.0));
        scene.push(Shape::Circle {
            center: Point::new(90.0, 30.0),
            radius: 8.0,
            fill: Rgba::BLUE,
            stroke: None,
        });
        scene.text(Label::new(Point::new(60.0, 10.0), "Title & <more>", 12.0, Rgba::BLACK));
        scene
    }

    #[test]
    fn test_scene_bookkeeping() {
        let scene = sample();
        assert_eq!(scene.len(), 4);
        assert!(!scene.is_empty());
        assert!(scene.has_text("Title & <more>"));
        assert!(!scene.has_text("Title"));
        assert_eq!(scene.labels().count(), 1);
    }

    #[test]
    fn test_rasterize_paints_shapes() {
        let fb = sample().rasterize().unwrap();
        assert_eq!(fb.width(), 120);
        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(90, 30), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(110, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_rasterize_zero_size_fails() {
        assert!(Scene::new(0, 10, Rgba::WHITE).rasterize().is_err());
    }

    #[test]
    fn test_to_svg_contains_text_and_shapes() {
        let svg = sample().to_svg().render();
        assert!(svg.contains("<rect x=\"10\""));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Title &amp; &lt;more&gt;"));
    }

    #[test]
    fn test_polygon_with_stroke() {
        let mut scene = Scene::new(50, 50, Rgba::WHITE);
        scene.push(Shape::Polygon {
            points: vec![Point::new(5.0, 5.0), Point::new(45.0, 5.0), Point::new(25.0, 45.0)],
            fill: Rgba::GREEN,
            stroke: Some(Stroke::new(Rgba::BLACK, 1.0)),
        });
        let fb = scene.rasterize().unwrap();
        assert_eq!(fb.get_pixel(25, 15), Some(Rgba::GREEN));
        assert!(scene.to_svg().render().contains("<polygon"));
    }
}
