//! Terminal output encoder.
//!
//! Renders a rasterized figure as text:
//! - ASCII: grayscale ramp ` .:-=+*#%@`
//! - Unicode half blocks: two vertical samples per cell with 24-bit color
//! - ANSI true color: one colored cell per sample

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;
use std::io::{self, Write};

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode half-block characters (2x vertical resolution)
    #[default]
    UnicodeHalfBlock,
    /// Full cells with ANSI 24-bit background color
    AnsiTrueColor,
}

/// Framebuffer-to-text encoder.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: Option<u32>,
    height: Option<u32>,
    invert: bool,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// Grayscale ramp from dark to light.
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Create an encoder in the default mode, 80 columns wide at most.
    #[must_use]
    pub fn new() -> Self {
        Self { mode: TerminalMode::default(), width: None, height: None, invert: false }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the width in columns.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height in lines.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Invert brightness, for light-on-dark terminals.
    #[must_use]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(fb),
            TerminalMode::UnicodeHalfBlock => self.render_half_block(fb),
            TerminalMode::AnsiTrueColor => self.render_true_color(fb),
        }
    }

    /// Render and write to `out`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: Write>(&self, fb: &Framebuffer, out: &mut W) -> io::Result<()> {
        out.write_all(self.render(fb).as_bytes())?;
        out.flush()
    }

    fn render_ascii(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.grid(fb, 2.0);
        let mut output = String::with_capacity((cols + 1) as usize * rows as usize);
        let sampler = Sampler::new(fb, cols, rows);

        for y in 0..rows {
            for x in 0..cols {
                let luma = self.adjust(sampler.average(x, y)).luminance();
                let idx = (luma * (Self::ASCII_RAMP.len() - 1) as f32).round() as usize;
                output.push(Self::ASCII_RAMP[idx.min(Self::ASCII_RAMP.len() - 1)]);
            }
            output.push('\n');
        }

        output
    }

    /// ▀ with the top sample as foreground and the bottom sample as background.
    fn render_half_block(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.grid(fb, 1.0);
        let rows = (rows + 1) & !1;
        let mut output = String::with_capacity((cols * 40 + 5) as usize * (rows / 2) as usize);
        let sampler = Sampler::new(fb, cols, rows);

        for y in (0..rows).step_by(2) {
            for x in 0..cols {
                let top = self.adjust(sampler.average(x, y));
                let bottom = self.adjust(sampler.average(x, y + 1));
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                );
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    fn render_true_color(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.grid(fb, 2.0);
        let mut output = String::with_capacity((cols * 20 + 5) as usize * rows as usize);
        let sampler = Sampler::new(fb, cols, rows);

        for y in 0..rows {
            for x in 0..cols {
                let c = self.adjust(sampler.average(x, y));
                let _ = write!(output, "\x1b[48;2;{};{};{}m ", c.r, c.g, c.b);
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    /// Grid size preserving aspect ratio; `char_aspect` is cell height over width.
    fn grid(&self, fb: &Framebuffer, char_aspect: f32) -> (u32, u32) {
        let fb_aspect = fb.width() as f32 / fb.height() as f32;

        match (self.width, self.height) {
            (Some(w), Some(h)) => (w.max(1), h.max(1)),
            (Some(w), None) => (w.max(1), ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1)),
            (None, Some(h)) => (((h as f32 * fb_aspect * char_aspect).round() as u32).max(1), h.max(1)),
            (None, None) => {
                let w = 80u32.min(fb.width());
                (w, ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1))
            }
        }
    }

    fn adjust(&self, c: Rgba) -> Rgba {
        if self.invert {
            Rgba::rgb(255 - c.r, 255 - c.g, 255 - c.b)
        } else {
            c
        }
    }
}

/// Box-filter downsampler, so thin strokes still register in coarse cells.
struct Sampler<'a> {
    fb: &'a Framebuffer,
    scale_x: f32,
    scale_y: f32,
}

impl<'a> Sampler<'a> {
    fn new(fb: &'a Framebuffer, cols: u32, rows: u32) -> Self {
        Self {
            fb,
            scale_x: fb.width() as f32 / cols as f32,
            scale_y: fb.height() as f32 / rows as f32,
        }
    }

    fn average(&self, cx: u32, cy: u32) -> Rgba {
        let x0 = (cx as f32 * self.scale_x) as u32;
        let y0 = (cy as f32 * self.scale_y) as u32;
        let x1 = (((cx + 1) as f32 * self.scale_x).ceil() as u32).clamp(x0 + 1, self.fb.width());
        let y1 = (((cy + 1) as f32 * self.scale_y).ceil() as u32).clamp(y0 + 1, self.fb.height());

        let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(p) = self.fb.get_pixel(x, y) {
                    r += u32::from(p.r);
                    g += u32::from(p.g);
                    b += u32::from(p.b);
                    n += 1;
                }
            }
        }

        if n == 0 {
            return Rgba::BLACK;
        }
        Rgba::rgb((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }
}
