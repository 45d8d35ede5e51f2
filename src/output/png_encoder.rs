//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const METERS_PER_INCH: f32 = 0.0254;

/// PNG encoder for framebuffer output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder {
    dpi: Option<u32>,
}

impl PngEncoder {
    /// Create an encoder that writes no physical resolution.
    #[must_use]
    pub const fn new() -> Self {
        Self { dpi: None }
    }

    /// Record `dpi` in the `pHYs` chunk.
    #[must_use]
    pub const fn with_dpi(dpi: u32) -> Self {
        Self { dpi: Some(dpi) }
    }

    /// Encode a framebuffer into `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn encode<W: Write>(&self, fb: &Framebuffer, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(dpi) = self.dpi {
            let ppm = (dpi as f32 / METERS_PER_INCH).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));
        }

        let mut writer = encoder.write_header()?;
        // Compact pixels drop the stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.encode(fb, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
