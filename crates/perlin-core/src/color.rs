//! Hex colour parsing and palette ramps.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of entries in a palette ramp; one per noise byte.
pub const RAMP_SIZE: usize = 256;

/// Palette used when a gradient texture is requested without stops.
pub const DEFAULT_STOPS: [Rgb; 2] = [Rgb::new(0x00, 0x57, 0xB7), Rgb::new(0xFF, 0xDD, 0x00)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// RGB plus an alpha byte that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Rgba {
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (a single leading `#` is optional).
pub fn hex_to_rgba(hex: &str) -> Result<Rgba> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || Error::InvalidHex(hex.to_string());
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channels: Vec<u8> = match digits.len() {
        3 | 4 => digits
            .chars()
            .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?,
        6 | 8 => (0..digits.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
            .collect::<Option<_>>()
            .ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    Ok(Rgba { r: channels[0], g: channels[1], b: channels[2], a: channels.get(3).copied() })
}

pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    hex_to_rgba(hex).map(Rgba::rgb)
}

fn mix(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + t * (b as f64 - a as f64)).round().clamp(0.0, 255.0) as u8
}

/// Interpolate `size` colours through `stops`.
///
/// With `wrap` the last stop blends back into the first, so `n` stops form
/// `n` equal segments; otherwise `n - 1` segments end exactly on the last stop.
pub fn build_ramp(stops: &[Rgb], size: usize, wrap: bool) -> Result<Vec<Rgb>> {
    if stops.is_empty() {
        return Err(Error::InvalidConfiguration("gradient needs at least one colour stop".into()));
    }
    Ok(interpolate(stops, size, wrap))
}

fn interpolate(stops: &[Rgb], size: usize, wrap: bool) -> Vec<Rgb> {
    if stops.len() == 1 {
        return vec![stops[0]; size];
    }
    let segments = if wrap { stops.len() } else { stops.len() - 1 };
    let denom = if wrap { size } else { size.saturating_sub(1).max(1) };
    (0..size)
        .map(|i| {
            let pos = i as f64 * segments as f64 / denom as f64;
            let seg = (pos.floor() as usize).min(segments - 1);
            let t = pos - seg as f64;
            let from = stops[seg];
            let to = stops[(seg + 1) % stops.len()];
            Rgb::new(mix(from.r, to.r, t), mix(from.g, to.g, t), mix(from.b, to.b, t))
        })
        .collect()
}

/// A fixed 256-entry palette indexed by noise bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientRamp {
    colors: Vec<Rgb>,
}

impl GradientRamp {
    /// Parse hex stops and build a wrapped 256-entry ramp. Malformed stops are
    /// configuration errors.
    pub fn from_hex<S: AsRef<str>>(stops: &[S]) -> Result<Self> {
        let parsed = stops
            .iter()
            .map(|s| hex_to_rgb(s.as_ref()).map_err(|e| e.in_configuration("gradient stop")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors: build_ramp(&parsed, RAMP_SIZE, true)? })
    }

    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Default for GradientRamp {
    fn default() -> Self {
        Self { colors: interpolate(&DEFAULT_STOPS, RAMP_SIZE, true) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_hex_forms() {
        assert_eq!(hex_to_rgba("#0057B7").unwrap(), Rgba { r: 0, g: 0x57, b: 0xB7, a: None });
        assert_eq!(hex_to_rgba("ffdd00").unwrap(), Rgba { r: 255, g: 0xDD, b: 0, a: None });
        assert_eq!(hex_to_rgba("#fa0").unwrap(), Rgba { r: 255, g: 170, b: 0, a: None });
        assert_eq!(hex_to_rgba("#fa08").unwrap().a, Some(0x88));
        assert_eq!(hex_to_rgba("#11223380").unwrap().a, Some(0x80));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#12", "#12345", "#gggggg", "#1234567", "#ÿÿÿ", "##fff", " #fff", "#fff "] {
            assert_eq!(hex_to_rgba(bad), Err(Error::InvalidHex(bad.to_string())), "{bad:?}");
        }
    }

    #[test]
    fn malformed_stop_is_a_configuration_error() {
        let err = GradientRamp::from_hex(&["#0057B7", "#zzz"]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(ref m) if m.contains("#zzz")), "{err:?}");
    }

    #[test]
    fn single_stop_ramp_is_constant() {
        let c = Rgb::new(12, 200, 99);
        let ramp = build_ramp(&[c], RAMP_SIZE, true).unwrap();
        assert_eq!(ramp.len(), 256);
        assert!(ramp.iter().all(|&x| x == c));
    }

    #[test]
    fn empty_stops_are_a_configuration_error() {
        assert!(matches!(build_ramp(&[], 256, true), Err(Error::InvalidConfiguration(_))));
        let none: [&str; 0] = [];
        assert!(GradientRamp::from_hex(&none).is_err());
    }

    #[test]
    fn wrapped_ramp_returns_towards_first_stop() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::WHITE;
        let ramp = build_ramp(&[black, white], 256, true).unwrap();
        assert_eq!(ramp[0], black);
        assert_eq!(ramp[128], white);
        assert!(ramp[64].r > 100 && ramp[64].r < 155);
        assert!(ramp[255].r < 5);
    }

    #[test]
    fn unwrapped_ramp_ends_on_last_stop() {
        let ramp = build_ramp(&[Rgb::new(0, 0, 0), Rgb::new(255, 0, 0)], 256, false).unwrap();
        assert_eq!(ramp[0].r, 0);
        assert_eq!(ramp[255].r, 255);
        assert!(ramp.windows(2).all(|w| w[0].r <= w[1].r));
    }

    #[test]
    fn default_ramp_starts_on_first_default_stop() {
        let ramp = GradientRamp::default();
        assert_eq!(ramp.colors().len(), RAMP_SIZE);
        assert_eq!(ramp.color(0), Rgb::new(0x00, 0x57, 0xB7));
        assert_eq!(ramp.color(128), Rgb::new(0xFF, 0xDD, 0x00));
    }
}
