//! Render backends: where finished figures go.
//!
//! The visualizer lays out a [`Figure`] and hands it to a [`RenderBackend`] exactly once per
//! rendered chart. Backends decide whether that means writing files, drawing to a terminal,
//! keeping the figure for inspection, or nothing at all.

mod file;
mod terminal;

pub use file::{PngBackend, SvgBackend};
pub use terminal::TerminalBackend;

use crate::error::Result;
use crate::figure::{ChartKind, Figure};

/// Destination for rendered figures.
///
/// # Example
///
/// ```
/// use trueno_dataviz::backend::RenderBackend;
/// use trueno_dataviz::error::Result;
/// use trueno_dataviz::figure::Figure;
///
/// struct Titles(Vec<String>);
///
/// impl RenderBackend for Titles {
///     fn id(&self) -> &'static str {
///         "titles"
///     }
///
///     fn render(&mut self, figure: &Figure) -> Result<()> {
///         self.0.push(figure.title.clone());
///         Ok(())
///     }
/// }
/// ```
pub trait RenderBackend {
    /// Short identifier used in log messages.
    fn id(&self) -> &'static str;

    /// Display or store one figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be laid out, encoded or written.
    fn render(&mut self, figure: &Figure) -> Result<()>;
}

/// A boxed backend for dynamic dispatch.
pub type BoxedBackend = Box<dyn RenderBackend>;

impl<B: RenderBackend + ?Sized> RenderBackend for Box<B> {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    fn render(&mut self, figure: &Figure) -> Result<()> {
        (**self).render(figure)
    }
}

impl<B: RenderBackend + ?Sized> RenderBackend for &mut B {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    fn render(&mut self, figure: &Figure) -> Result<()> {
        (**self).render(figure)
    }
}

/// Discards every figure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl RenderBackend for NullBackend {
    fn id(&self) -> &'static str {
        "null"
    }

    fn render(&mut self, _figure: &Figure) -> Result<()> {
        Ok(())
    }
}

/// Keeps every figure it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    figures: Vec<Figure>,
}

impl RecordingBackend {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Figures received so far.
    #[must_use]
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Number of figures received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// True if nothing has been rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Most recent figure.
    #[must_use]
    pub fn last(&self) -> Option<&Figure> {
        self.figures.last()
    }

    /// Figures of one chart type.
    pub fn of_kind(&self, kind: ChartKind) -> impl Iterator<Item = &Figure> {
        self.figures.iter().filter(move |f| f.kind() == kind)
    }

    /// Forget all figures.
    pub fn clear(&mut self) {
        self.figures.clear();
    }

    /// Take the recorded figures.
    #[must_use]
    pub fn into_figures(self) -> Vec<Figure> {
        self.figures
    }
}

impl RenderBackend for RecordingBackend {
    fn id(&self) -> &'static str {
        "recording"
    }

    fn render(&mut self, figure: &Figure) -> Result<()> {
        self.figures.push(figure.clone());
        Ok(())
    }
}

/// File stem for the `index`-th figure: `003_histogram_distribution_of_age`.
pub(crate) fn file_stem(index: usize, figure: &Figure) -> String {
    let slug: String = figure
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = slug.split('_').filter(|s| !s.is_empty()).collect::<Vec<_>>().join("_");
    if slug.is_empty() {
        format!("{index:03}_{}", figure.kind())
    } else {
        format!("{index:03}_{}_{slug}", figure.kind())
    }
}
