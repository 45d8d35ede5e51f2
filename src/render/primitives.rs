//! Primitive rasterization.
//!
//! Lines, rectangles, circles and polygons drawn straight into a [`Framebuffer`].

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a one-pixel line using Bresenham's algorithm.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);

    loop {
        plot(fb, x, y, color, 1.0);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are touched per step along the major axis, weighted by the fractional
/// distance to the ideal line.
pub fn draw_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba) {
    let steep = (to.y - from.y).abs() > (to.x - from.x).abs();
    let (x0, y0, x1, y1) =
        if steep { (from.y, from.x, to.y, to.x) } else { (from.x, from.y, to.x, to.y) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { (y1 - y0) / dx };

    let mut put = |major: i32, minor: i32, intensity: f32| {
        if steep {
            plot(fb, minor, major, color, intensity);
        } else {
            plot(fb, major, minor, color, intensity);
        }
    };

    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    put(xpxl1, yend.floor() as i32, rfpart(yend) * xgap);
    put(xpxl1, yend.floor() as i32 + 1, fpart(yend) * xgap);
    let mut intery = yend + gradient;

    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    put(xpxl2, yend.floor() as i32, rfpart(yend) * xgap);
    put(xpxl2, yend.floor() as i32 + 1, fpart(yend) * xgap);

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i32;
        put(x, ipart, rfpart(intery));
        put(x, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

/// Draw a line of the given width.
///
/// Widths up to 1.5px use the anti-aliased path; wider strokes are filled as quads.
pub fn draw_thick_line(fb: &mut Framebuffer, from: Point, to: Point, width: f32, color: Rgba) {
    if width <= 1.5 {
        draw_line_aa(fb, from, to, color);
        return;
    }

    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        draw_circle(fb, from.x as i32, from.y as i32, (width / 2.0) as i32, color);
        return;
    }

    let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);
    fill_polygon(
        fb,
        &[
            Point::new(from.x + nx, from.y + ny),
            Point::new(to.x + nx, to.y + ny),
            Point::new(to.x - nx, to.y - ny),
            Point::new(from.x - nx, from.y - ny),
        ],
        color,
    );
}

/// Draw connected segments through `points`.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], width: f32, color: Rgba) {
    for pair in points.windows(2) {
        draw_thick_line(fb, pair[0], pair[1], width, color);
    }
}

#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x < 0 || y < 0 {
        return;
    }
    if intensity >= 1.0 && color.a == 255 {
        fb.set_pixel(x as u32, y as u32, color);
    } else {
        let alpha = (f32::from(color.a) * intensity.clamp(0.0, 1.0)) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Rectangles and Polygons
// ============================================================================

/// Fill a rectangle given in floating-point coordinates.
///
/// Edges are rounded to the nearest pixel; negative origins are clipped.
pub fn draw_rect(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    let x0 = rect.x.round().max(0.0);
    let y0 = rect.y.round().max(0.0);
    let x1 = rect.right().round().max(0.0);
    let y1 = rect.bottom().round().max(0.0);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    fb.fill_rect(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32, color);
}

/// Draw a rectangle border of the given thickness.
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: Rect, thickness: f32, color: Rgba) {
    let t = thickness.max(1.0);
    draw_rect(fb, Rect::new(rect.x, rect.y, rect.width, t), color);
    draw_rect(fb, Rect::new(rect.x, rect.bottom() - t, rect.width, t), color);
    draw_rect(fb, Rect::new(rect.x, rect.y + t, t, rect.height - 2.0 * t), color);
    draw_rect(fb, Rect::new(rect.right() - t, rect.y + t, t, rect.height - 2.0 * t), color);
}

/// Fill a simple polygon with the even-odd scanline rule.
pub fn fill_polygon(fb: &mut Framebuffer, points: &[Point], color: Rgba) {
    if points.len() < 3 {
        return;
    }

    let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0) as i32;
    let max_y = points
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil()
        .min(fb.height() as f32 - 1.0) as i32;

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in min_y..=max_y {
        let scan = y as f32 + 0.5;
        crossings.clear();

        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                let t = (scan - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for span in crossings.chunks_exact(2) {
            let x_start = span[0].round().max(0.0) as i32;
            let x_end = span[1].round().min(fb.width() as f32) as i32;
            draw_horizontal_line(fb, x_start, x_end - 1, y, color);
        }
    }
}

// ============================================================================
// Circles
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 {
            plot(fb, cx, cy, color, 1.0);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        draw_horizontal_line(fb, cx - x, cx + x, cy + y, color);
        draw_horizontal_line(fb, cx - x, cx + x, cy - y, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy + x, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a circle outline.
pub fn draw_circle_outline(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 {
            plot(fb, cx, cy, color, 1.0);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (px, py) in [(x, y), (-x, y), (x, -y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
            plot(fb, cx + px, cy + py, color, 1.0);
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).max(0).min(fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = canvas();
        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = canvas();
        draw_line(&mut fb, 10, 10, 90, 90, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_line_out_of_bounds() {
        let mut fb = canvas();
        draw_line(&mut fb, -10, -10, 110, 110, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_aa_touches_path() {
        let mut fb = canvas();
        draw_line_aa(&mut fb, Point::new(10.0, 10.0), Point::new(90.0, 50.0), Rgba::BLACK);
        assert!(fb.coverage(Rgba::WHITE) > 0.0);
    }

    #[test]
    fn test_thick_line_is_wide() {
        let mut fb = canvas();
        draw_thick_line(&mut fb, Point::new(10.0, 50.0), Point::new(90.0, 50.0), 6.0, Rgba::RED);
        assert_eq!(fb.get_pixel(50, 48), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(50, 51), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(50, 60), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect() {
        let mut fb = canvas();
        draw_rect(&mut fb, Rect::new(20.0, 20.0, 30.0, 30.0), Rgba::RED);

        assert_eq!(fb.get_pixel(25, 25), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect_negative_origin_clipped() {
        let mut fb = canvas();
        draw_rect(&mut fb, Rect::new(-10.0, -10.0, 20.0, 20.0), Rgba::RED);
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(12, 12), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut fb = canvas();
        draw_rect_outline(&mut fb, Rect::new(20.0, 20.0, 30.0, 30.0), 2.0, Rgba::RED);

        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(35, 35), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut fb = canvas();
        let tri = [Point::new(10.0, 90.0), Point::new(50.0, 10.0), Point::new(90.0, 90.0)];
        fill_polygon(&mut fb, &tri, Rgba::BLUE);

        assert_eq!(fb.get_pixel(50, 70), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(15, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_polygon_degenerate_is_noop() {
        let mut fb = canvas();
        fill_polygon(&mut fb, &[Point::new(1.0, 1.0), Point::new(5.0, 5.0)], Rgba::BLUE);
        assert!(fb.coverage(Rgba::WHITE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_draw_circle() {
        let mut fb = canvas();
        draw_circle(&mut fb, 50, 50, 20, Rgba::BLUE);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_circle_outline() {
        let mut fb = canvas();
        draw_circle_outline(&mut fb, 50, 50, 20, Rgba::GREEN);

        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_zero_radius() {
        let mut fb = canvas();
        draw_circle(&mut fb, 50, 50, 0, Rgba::RED);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::RED));
    }
}
