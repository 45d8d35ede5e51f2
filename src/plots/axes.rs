//! Shared axis layout: plot area, ticks, grid lines and category labels.

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::output::TextAnchor;
use crate::render::{Label, Scene, Stroke};
use crate::error::Result;
use crate::scale::{BandScale, LinearScale, Scale};

use crate::figure::Style;

/// Text and tick color.
pub(crate) const INK: Rgba = Rgba::DARK_GRAY;
/// Grid line color for the white-grid style.
pub(crate) const GRID: Rgba = Rgba::rgb(234, 234, 242);
/// Axis spine color.
pub(crate) const SPINE: Rgba = Rgba::rgb(128, 128, 128);

const TICK_COUNT: usize = 6;

/// Plot area and type sizes derived from the canvas.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Axes {
    /// Region data is drawn into.
    pub area: Rect,
    /// Base font size in pixels.
    pub font: f32,
    pub style: Style,
}

impl Axes {
    /// Lay out axes on a `width` x `height` canvas.
    pub(crate) fn new(width: u32, height: u32, style: Style) -> Self {
        let (w, h) = (width as f32, height as f32);
        let font = (w.min(h) * 0.03).clamp(7.0, 16.0);
        let area = Rect::new(0.0, 0.0, w, h).inset(font * 6.5, font * 3.0, font * 2.0, font * 4.5);
        Self { area, font, style }
    }

    /// Space between tick labels and the axis.
    pub(crate) fn pad(&self) -> f32 {
        self.font * 0.5
    }

    /// Draw the spines framing the plot area.
    pub(crate) fn draw_frame(&self, scene: &mut Scene) {
        let a = self.area;
        let stroke = Stroke::new(SPINE, 1.0);
        if self.style == Style::WhiteGrid {
            scene.rect(a, Rgba::WHITE, Some(Stroke::new(GRID, 1.0)));
            return;
        }
        scene.line(Point::new(a.x, a.bottom()), Point::new(a.right(), a.bottom()), stroke);
        scene.line(Point::new(a.x, a.y), Point::new(a.x, a.bottom()), stroke);
    }

    /// Vertical axis ticks for `scale`, whose range spans the plot area bottom to top.
    pub(crate) fn draw_y_ticks(&self, scene: &mut Scene, scale: &LinearScale) {
        let a = self.area;
        for value in scale.ticks(TICK_COUNT) {
            let y = scale.scale(value);
            if self.style == Style::WhiteGrid {
                scene.line(Point::new(a.x, y), Point::new(a.right(), y), Stroke::new(GRID, 1.0));
            }
            scene.line(Point::new(a.x - self.pad(), y), Point::new(a.x, y), Stroke::new(INK, 1.0));
            scene.text(
                Label::new(Point::new(a.x - self.pad() * 2.0, y + self.font * 0.35), format_tick(value), self.font, INK)
                    .anchor(TextAnchor::End),
            );
        }
    }

    /// Horizontal axis ticks for `scale`, whose range spans the plot area left to right.
    pub(crate) fn draw_x_ticks(&self, scene: &mut Scene, scale: &LinearScale) {
        let a = self.area;
        for value in scale.ticks(TICK_COUNT) {
            let x = scale.scale(value);
            if self.style == Style::WhiteGrid {
                scene.line(Point::new(x, a.y), Point::new(x, a.bottom()), Stroke::new(GRID, 1.0));
            }
            scene.line(Point::new(x, a.bottom()), Point::new(x, a.bottom() + self.pad()), Stroke::new(INK, 1.0));
            scene.text(
                Label::new(Point::new(x, a.bottom() + self.pad() + self.font), format_tick(value), self.font, INK)
                    .anchor(TextAnchor::Middle),
            );
        }
    }

    /// Category names centered under each band.
    pub(crate) fn draw_x_categories(&self, scene: &mut Scene, bands: &BandScale, names: &[String]) {
        let a = self.area;
        for (i, name) in names.iter().enumerate() {
            let x = bands.center(i);
            scene.line(Point::new(x, a.bottom()), Point::new(x, a.bottom() + self.pad()), Stroke::new(INK, 1.0));
            scene.text(
                Label::new(Point::new(x, a.bottom() + self.pad() + self.font), name.clone(), self.font, INK)
                    .anchor(TextAnchor::Middle),
            );
        }
    }

    /// Linear scale mapping `domain` onto the plot area bottom-to-top.
    pub(crate) fn y_scale(&self, domain: (f64, f64)) -> Result<LinearScale> {
        LinearScale::new(widen(domain), (self.area.bottom(), self.area.y))
    }

    /// Linear scale mapping `domain` onto the plot area left-to-right.
    pub(crate) fn x_scale(&self, domain: (f64, f64)) -> Result<LinearScale> {
        LinearScale::new(widen(domain), (self.area.x, self.area.right()))
    }

    /// Band scale splitting the plot width into `count` slots.
    pub(crate) fn x_bands(&self, count: usize) -> Option<BandScale> {
        BandScale::new(count, (self.area.x, self.area.right())).ok()
    }
}

/// Give a zero-width domain a unit extent (wider at large magnitudes) so it can be scaled.
fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    let magnitude = lo.abs().max(hi.abs());
    if (hi - lo).abs() <= magnitude * f64::EPSILON * 4.0 {
        let half = (magnitude * 1e-6).max(0.5);
        (lo - half, hi + half)
    } else {
        (lo, hi)
    }
}

/// Compact tick label: integers without decimals, tiny values in exponent form, others with
/// at most two decimals.
pub(crate) fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() < 1e-2 {
        return format!("{value:.2e}");
    }
    if value.fract().abs() < 1e-9 {
        return format!("{value:.0}");
    }
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Domain from 0 (or the lowest value, if negative) to the highest value plus 5% headroom.
pub(crate) fn zero_based(lo: f64, hi: f64) -> (f64, f64) {
    let (lo, hi) = (lo.min(0.0), hi.max(0.0));
    let pad = (hi - lo) * 0.05;
    (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
}

/// Domain covering `[lo, hi]` with `frac` of the span added on each side.
pub(crate) fn padded(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let pad = (hi - lo) * frac;
    (lo - pad, hi + pad)
}
