//! Color types and categorical palettes.
//!
//! Provides RGBA and HSLA color representations and the qualitative palettes used to
//! color-differentiate hue groups.

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Axis and text gray.
    pub const DARK_GRAY: Self = Self::new(38, 38, 38, 255);
    /// Grid line gray.
    pub const LIGHT_GRAY: Self = Self::new(204, 204, 204, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// Relative luminance (ITU-R BT.709), 0.0-1.0.
    #[must_use]
    pub fn luminance(self) -> f32 {
        (0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b))
            / 255.0
    }

    /// Black or white, whichever reads better on top of this color.
    #[must_use]
    pub fn contrasting_text(self) -> Self {
        if self.luminance() > 0.5 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h / 360.0;
        let s = self.s;
        let l = self.l;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::new(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// Qualitative palette for hue groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// Saturated, medium-lightness colors.
    #[default]
    Deep,
    /// Softer variant of `Deep`.
    Muted,
    /// Colors distinguishable under common color-vision deficiencies.
    Colorblind,
}

const DEEP: [Rgba; 10] = [
    Rgba::rgb(76, 114, 176),
    Rgba::rgb(221, 132, 82),
    Rgba::rgb(85, 168, 104),
    Rgba::rgb(196, 78, 82),
    Rgba::rgb(129, 114, 179),
    Rgba::rgb(147, 120, 96),
    Rgba::rgb(218, 139, 195),
    Rgba::rgb(140, 140, 140),
    Rgba::rgb(204, 185, 116),
    Rgba::rgb(100, 181, 205),
];

const MUTED: [Rgba; 10] = [
    Rgba::rgb(72, 120, 208),
    Rgba::rgb(238, 133, 74),
    Rgba::rgb(106, 204, 100),
    Rgba::rgb(214, 95, 95),
    Rgba::rgb(149, 108, 180),
    Rgba::rgb(140, 97, 60),
    Rgba::rgb(220, 126, 192),
    Rgba::rgb(121, 121, 121),
    Rgba::rgb(213, 187, 103),
    Rgba::rgb(130, 198, 226),
];

const COLORBLIND: [Rgba; 10] = [
    Rgba::rgb(1, 115, 178),
    Rgba::rgb(222, 143, 5),
    Rgba::rgb(2, 158, 115),
    Rgba::rgb(213, 94, 0),
    Rgba::rgb(204, 120, 188),
    Rgba::rgb(202, 145, 97),
    Rgba::rgb(251, 175, 228),
    Rgba::rgb(148, 148, 148),
    Rgba::rgb(236, 225, 51),
    Rgba::rgb(86, 180, 233),
];

impl Palette {
    fn base(self) -> &'static [Rgba] {
        match self {
            Palette::Deep => &DEEP,
            Palette::Muted => &MUTED,
            Palette::Colorblind => &COLORBLIND,
        }
    }

    /// Color for the `index`-th group.
    ///
    /// Indices past the base cycle get evenly spaced hues so every group stays distinct.
    #[must_use]
    pub fn color(self, index: usize) -> Rgba {
        let base = self.base();
        if index < base.len() {
            return base[index];
        }
        let extra = index - base.len();
        // Golden-angle spacing keeps successive hues far apart.
        let hue = (extra as f32 * 137.508) % 360.0;
        Hsla::hsl(hue, 0.55, 0.55).to_rgba()
    }

    /// The first `n` colors of the palette.
    #[must_use]
    pub fn colors(self, n: usize) -> Vec<Rgba> {
        (0..n).map(|i| self.color(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 127);
        assert_eq!(mid.b, 127);
    }

    #[test]
    fn test_lerp_boundaries() {
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, -0.5), Rgba::BLACK);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 1.5), Rgba::WHITE);
    }

    #[test]
    fn test_hsla_to_rgba() {
        let red = Hsla::hsl(0.0, 1.0, 0.5).to_rgba();
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));

        let gray = Hsla::hsl(0.0, 0.0, 0.5).to_rgba();
        assert_eq!((gray.r, gray.g, gray.b), (127, 127, 127));
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(Rgba::WHITE.contrasting_text(), Rgba::BLACK);
        assert_eq!(Rgba::rgb(59, 76, 192).contrasting_text(), Rgba::WHITE);
    }

    #[test]
    fn test_palette_cycle_is_distinct() {
        for palette in [Palette::Deep, Palette::Muted, Palette::Colorblind] {
            let colors = palette.colors(14);
            for i in 0..colors.len() {
                for j in (i + 1)..colors.len() {
                    assert_ne!(colors[i], colors[j], "{palette:?} repeats at {i}/{j}");
                }
            }
        }
    }

    #[test]
    fn test_palette_default_is_deep() {
        assert_eq!(Palette::default(), Palette::Deep);
        assert_eq!(Palette::Deep.color(0), Rgba::rgb(76, 114, 176));
    }
}
