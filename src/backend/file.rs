//! File-producing backends.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{file_stem, RenderBackend};
use crate::error::Result;
use crate::figure::Figure;
use crate::output::PngEncoder;

/// Renders figures to SVG documents, keeping them in memory and optionally writing them out.
///
/// SVG output carries every text element: titles, tick labels and annotations.
#[derive(Debug, Clone, Default)]
pub struct SvgBackend {
    documents: Vec<String>,
    output_dir: Option<PathBuf>,
    written: Vec<PathBuf>,
}

impl SvgBackend {
    /// Keep documents in memory only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write each document into `dir`, created on first use.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Rendered documents, in order.
    #[must_use]
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Files written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RenderBackend for SvgBackend {
    fn id(&self) -> &'static str {
        "svg"
    }

    fn render(&mut self, figure: &Figure) -> Result<()> {
        let svg = figure.to_svg()?;
        if let Some(dir) = &self.output_dir {
            let path = target(dir, self.documents.len(), figure, "svg")?;
            svg.write_to_file(&path)?;
            debug!("wrote {}", path.display());
            self.written.push(path);
        }
        self.documents.push(svg.render());
        Ok(())
    }
}

/// Rasterizes figures into PNG files, one per figure.
///
/// Raster output holds shapes only; use [`SvgBackend`] where text is needed.
#[derive(Debug, Clone)]
pub struct PngBackend {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngBackend {
    /// Write files into `dir`, created on first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), written: Vec::new() }
    }

    /// Files written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RenderBackend for PngBackend {
    fn id(&self) -> &'static str {
        "png"
    }

    fn render(&mut self, figure: &Figure) -> Result<()> {
        let fb = figure.to_framebuffer()?;
        let path = target(&self.dir, self.written.len(), figure, "png")?;
        PngEncoder::with_dpi(figure.dpi).write_to_file(&fb, &path)?;
        debug!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

fn target(dir: &Path, index: usize, figure: &Figure, ext: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.join(format!("{}.{ext}", file_stem(index, figure))))
}
