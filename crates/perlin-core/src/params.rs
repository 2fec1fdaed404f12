use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, GradientRamp};
use crate::error::{Error, Result};
use crate::pixel::Blend;

/// Requested channel arrangement of a texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixType {
    Monochrome,
    #[default]
    Rgb,
    Rgba,
    /// One noise channel used as an index into a colour ramp.
    Gradient,
}

/// Background compositing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendParams {
    /// Hex colour, e.g. `#FFFFFF`.
    pub background: String,
    /// 0 = background only, 1 = texture only.
    pub opacity: f64,
}

/// User-facing texture parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureParams {
    pub width: usize,
    pub height: usize,
    #[serde(rename = "type", default)]
    pub kind: MatrixType,
    /// Stretch every channel to the full 0-255 range.
    #[serde(default = "default_scale")]
    pub scale: bool,
    /// Hex colour stops; only read for `gradient` textures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend: Option<BlendParams>,
    /// Fixed seed for reproducible output; fresh entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_scale() -> bool {
    true
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            kind: MatrixType::Rgb,
            scale: true,
            gradient: None,
            blend: None,
            seed: None,
        }
    }
}

impl TextureParams {
    pub fn new(width: usize, height: usize, kind: MatrixType) -> Self {
        Self { width, height, kind, ..Self::default() }
    }

    /// Parse params from JSON. Any deserialization failure, including a
    /// negative or non-integer `width`/`height`, is `InvalidConfiguration`;
    /// `InvalidDimension` is reserved for zero sizes caught by
    /// [`validate_dimensions`](Self::validate_dimensions).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfiguration(e.to_string()))
    }

    pub fn validate_dimensions(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimension { width: self.width, height: self.height });
        }
        Ok(())
    }

    /// Palette built from `gradient`, or the default stops when none are given.
    pub fn ramp(&self) -> Result<GradientRamp> {
        match &self.gradient {
            Some(stops) => GradientRamp::from_hex(stops),
            None => Ok(GradientRamp::default()),
        }
    }

    /// The palette, for gradient textures only.
    pub fn gradient_ramp(&self) -> Result<Option<GradientRamp>> {
        if self.kind != MatrixType::Gradient {
            return Ok(None);
        }
        self.ramp().map(Some)
    }

    pub fn resolve_blend(&self) -> Result<Option<Blend>> {
        self.blend
            .as_ref()
            .map(|b| {
                let background = hex_to_rgb(&b.background)
                    .map_err(|e| e.in_configuration("blend background"))?;
                Blend::new(background, b.opacity)
            })
            .transpose()
    }
}
