//! Interactive display on a terminal.

use std::io::{self, Stdout, Write};

use super::RenderBackend;
use crate::error::Result;
use crate::figure::Figure;
use crate::output::{TerminalEncoder, TerminalMode};

/// Draws each figure as colored text on a writer, headed by its title.
///
/// Raster output carries no glyphs, so the title and axis labels are printed as plain lines.
#[derive(Debug)]
pub struct TerminalBackend<W: Write = Stdout> {
    out: W,
    encoder: TerminalEncoder,
}

impl TerminalBackend<Stdout> {
    /// Draw to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBackend<W> {
    /// Draw to `out` with the default encoder.
    pub fn new(out: W) -> Self {
        Self { out, encoder: TerminalEncoder::new() }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.encoder = self.encoder.mode(mode);
        self
    }

    /// Set the width in columns.
    #[must_use]
    pub fn width(mut self, columns: u32) -> Self {
        self.encoder = self.encoder.width(columns);
        self
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Take back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderBackend for TerminalBackend<W> {
    fn id(&self) -> &'static str {
        "terminal"
    }

    fn render(&mut self, figure: &Figure) -> Result<()> {
        let fb = figure.to_framebuffer()?;
        if !figure.title.is_empty() {
            writeln!(self.out, "{}", figure.title)?;
        }
        match (figure.x_label.is_empty(), figure.y_label.is_empty()) {
            (true, true) => {}
            _ => writeln!(self.out, "x: {}  y: {}", figure.x_label, figure.y_label)?,
        }
        if let Some(legend) = &figure.legend {
            writeln!(self.out, "legend: {}", legend.labels.join(", "))?;
        }
        self.encoder.write_to(&fb, &mut self.out)?;
        Ok(())
    }
}
