//! Resolved pixel values and alpha blending.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::error::{Error, Result};

/// A pixel as produced by a channel stack: one, three or four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelValue {
    Mono(u8),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

impl PixelValue {
    /// First channel (red, or the single mono value).
    pub fn first(self) -> u8 {
        match self {
            PixelValue::Mono(m) => m,
            PixelValue::Rgb(r, ..) | PixelValue::Rgba(r, ..) => r,
        }
    }

    /// Fill missing green/blue from red; alpha stays absent unless present.
    pub fn normalize(self) -> Rgba {
        match self {
            PixelValue::Mono(m) => Rgba { r: m, g: m, b: m, a: None },
            PixelValue::Rgb(r, g, b) => Rgba { r, g, b, a: None },
            PixelValue::Rgba(r, g, b, a) => Rgba { r, g, b, a: Some(a) },
        }
    }

    /// Bytes in channel order, as many as the variant carries.
    pub fn channels(self) -> Vec<u8> {
        match self {
            PixelValue::Mono(m) => vec![m],
            PixelValue::Rgb(r, g, b) => vec![r, g, b],
            PixelValue::Rgba(r, g, b, a) => vec![r, g, b, a],
        }
    }
}

impl From<Rgb> for PixelValue {
    fn from(c: Rgb) -> Self {
        PixelValue::Rgb(c.r, c.g, c.b)
    }
}

/// Composite over a fixed background at a fixed opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    pub background: Rgb,
    opacity: f64,
}

impl Blend {
    pub fn new(background: Rgb, opacity: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(Error::InvalidConfiguration(format!(
                "blend opacity must be within [0, 1], got {opacity}"
            )));
        }
        Ok(Self { background, opacity })
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Blend `fg` over the background. A foreground without alpha counts as
    /// opaque; the result always carries alpha `fg_alpha * opacity`.
    pub fn apply(&self, fg: PixelValue) -> PixelValue {
        let fg = fg.normalize();
        let o = self.opacity;
        let bg = self.background;
        let channel = |f: u8, b: u8| (f as f64 * o + b as f64 * (1.0 - o)).round() as u8;
        let alpha = (fg.a.unwrap_or(255) as f64 * o).round() as u8;
        PixelValue::Rgba(channel(fg.r, bg.r), channel(fg.g, bg.g), channel(fg.b, bg.b), alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_fills_from_first_channel() {
        assert_eq!(PixelValue::Mono(42).normalize(), Rgba { r: 42, g: 42, b: 42, a: None });
        assert_eq!(PixelValue::Rgb(1, 2, 3).normalize(), Rgba { r: 1, g: 2, b: 3, a: None });
        assert_eq!(PixelValue::Rgba(1, 2, 3, 4).normalize().a, Some(4));
    }

    #[test]
    fn channels_match_variant_width() {
        assert_eq!(PixelValue::Mono(9).channels().len(), 1);
        assert_eq!(PixelValue::Rgb(9, 8, 7).channels(), vec![9, 8, 7]);
        assert_eq!(PixelValue::Rgba(9, 8, 7, 6).channels().len(), 4);
    }

    #[test]
    fn full_opacity_keeps_foreground() {
        let blend = Blend::new(Rgb::new(10, 20, 30), 1.0).unwrap();
        assert_eq!(blend.apply(PixelValue::Rgb(200, 100, 50)), PixelValue::Rgba(200, 100, 50, 255));
        assert_eq!(blend.apply(PixelValue::Rgba(1, 2, 3, 77)), PixelValue::Rgba(1, 2, 3, 77));
    }

    #[test]
    fn zero_opacity_yields_background() {
        let blend = Blend::new(Rgb::new(10, 20, 30), 0.0).unwrap();
        assert_eq!(blend.apply(PixelValue::Mono(250)), PixelValue::Rgba(10, 20, 30, 0));
    }

    #[test]
    fn half_opacity_rounds_midpoint() {
        let blend = Blend::new(Rgb::WHITE, 0.5).unwrap();
        // 0 * 0.5 + 255 * 0.5 = 127.5 rounds away from zero.
        assert_eq!(blend.apply(PixelValue::Mono(0)), PixelValue::Rgba(128, 128, 128, 128));
    }

    #[test]
    fn opacity_outside_unit_range_is_rejected() {
        assert!(Blend::new(Rgb::WHITE, 1.5).is_err());
        assert!(Blend::new(Rgb::WHITE, -0.1).is_err());
        assert!(Blend::new(Rgb::WHITE, f64::NAN).is_err());
    }
}
