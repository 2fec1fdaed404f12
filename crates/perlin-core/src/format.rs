//! CSS colour text for resolved pixels.

use crate::pixel::PixelValue;

/// Neutral grey from the first channel: `rgb(m, m, m)`.
pub fn to_mono(pixel: PixelValue) -> String {
    let m = pixel.first();
    format!("rgb({m}, {m}, {m})")
}

pub fn to_rgb(pixel: PixelValue) -> String {
    let c = pixel.normalize();
    format!("rgb({}, {}, {})", c.r, c.g, c.b)
}

/// `alpha` overrides the pixel's own alpha; without either the colour is opaque.
pub fn to_rgba(pixel: PixelValue, alpha: Option<f64>) -> String {
    let c = pixel.normalize();
    let a = alpha.or_else(|| c.a.map(|a| a as f64 / 255.0)).unwrap_or(1.0);
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, a)
}

/// Channel-complete RGBA scaled to [0, 1], alpha defaulting to 1.
pub fn to_unit_rgba(pixel: PixelValue) -> [f64; 4] {
    let c = pixel.normalize();
    [
        c.r as f64 / 255.0,
        c.g as f64 / 255.0,
        c.b as f64 / 255.0,
        c.a.map_or(1.0, |a| a as f64 / 255.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_uses_first_channel() {
        assert_eq!(to_mono(PixelValue::Mono(17)), "rgb(17, 17, 17)");
        assert_eq!(to_mono(PixelValue::Rgb(5, 6, 7)), "rgb(5, 5, 5)");
    }

    #[test]
    fn rgb_fills_missing_channels_from_red() {
        assert_eq!(to_rgb(PixelValue::Mono(90)), "rgb(90, 90, 90)");
        assert_eq!(to_rgb(PixelValue::Rgba(1, 2, 3, 4)), "rgb(1, 2, 3)");
    }

    #[test]
    fn rgba_alpha_precedence() {
        assert_eq!(to_rgba(PixelValue::Rgba(1, 2, 3, 255), Some(0.3)), "rgba(1, 2, 3, 0.3)");
        assert_eq!(to_rgba(PixelValue::Rgba(1, 2, 3, 51), None), "rgba(1, 2, 3, 0.2)");
        assert_eq!(to_rgba(PixelValue::Rgb(1, 2, 3), None), "rgba(1, 2, 3, 1)");
        assert_eq!(to_rgba(PixelValue::Mono(8), None), "rgba(8, 8, 8, 1)");
    }

    #[test]
    fn unit_rgba_scales_bytes() {
        assert_eq!(to_unit_rgba(PixelValue::Mono(255)), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(to_unit_rgba(PixelValue::Rgba(0, 255, 0, 0)), [0.0, 1.0, 0.0, 0.0]);
    }
}
