//! Independent noise planes stacked into coloured pixels.
//!
//! Building a [`ChannelStack`] generates and materializes every channel up
//! front; reading pixels afterwards is pure lookup and compositing.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::GradientRamp;
use crate::error::{Error, Result};
use crate::format;
use crate::noise::{ByteMatrix, NoiseConfig, NoiseField};
use crate::params::{MatrixType, TextureParams};
use crate::pixel::{Blend, PixelValue};

/// How channel bytes turn into a pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    Monochrome,
    Rgb,
    Rgba,
    /// Single index channel looked up in a palette.
    Gradient(GradientRamp),
}

impl ChannelLayout {
    pub fn resolve(params: &TextureParams) -> Result<Self> {
        Ok(match params.kind {
            MatrixType::Monochrome => ChannelLayout::Monochrome,
            MatrixType::Rgb => ChannelLayout::Rgb,
            MatrixType::Rgba => ChannelLayout::Rgba,
            MatrixType::Gradient => ChannelLayout::Gradient(params.ramp()?),
        })
    }

    /// Number of noise planes this layout reads.
    pub fn channel_count(&self) -> usize {
        match self {
            ChannelLayout::Monochrome | ChannelLayout::Gradient(_) => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    pub fn kind(&self) -> MatrixType {
        match self {
            ChannelLayout::Monochrome => MatrixType::Monochrome,
            ChannelLayout::Rgb => MatrixType::Rgb,
            ChannelLayout::Rgba => MatrixType::Rgba,
            ChannelLayout::Gradient(_) => MatrixType::Gradient,
        }
    }

    /// `bytes` holds exactly `channel_count()` values.
    fn compose(&self, bytes: &[u8]) -> PixelValue {
        match self {
            ChannelLayout::Monochrome => PixelValue::Mono(bytes[0]),
            ChannelLayout::Rgb => PixelValue::Rgb(bytes[0], bytes[1], bytes[2]),
            ChannelLayout::Rgba => PixelValue::Rgba(bytes[0], bytes[1], bytes[2], bytes[3]),
            ChannelLayout::Gradient(ramp) => ramp.color(bytes[0]).into(),
        }
    }
}

/// One materialized noise matrix per channel plus the rules to combine them.
pub struct ChannelStack {
    width: usize,
    height: usize,
    layout: ChannelLayout,
    blend: Option<Blend>,
    fields: Vec<NoiseField>,
    channels: Vec<ByteMatrix>,
}

impl ChannelStack {
    /// Validate `params`, generate one independent field per channel and
    /// materialize them all.
    pub fn build(params: &TextureParams) -> Result<Self> {
        params.validate_dimensions()?;
        let layout = ChannelLayout::resolve(params)?;
        let blend = params.resolve_blend()?;

        let mut master = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let config = NoiseConfig {
            width: params.width,
            height: params.height,
            single_cell: true,
            rescale: params.scale,
        };
        let fields = (0..layout.channel_count())
            .map(|_| NoiseField::with_seed(config, master.gen()))
            .collect::<Result<Vec<_>>>()?;
        let channels = fields.iter().map(NoiseField::materialize).collect();

        debug!(
            "built {:?} stack {}x{} with {} channel(s), blend={}",
            layout.kind(),
            params.width,
            params.height,
            fields.len(),
            blend.is_some()
        );

        Ok(Self { width: params.width, height: params.height, layout, blend, fields, channels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> &ChannelLayout {
        &self.layout
    }

    pub fn blend(&self) -> Option<&Blend> {
        self.blend.as_ref()
    }

    pub fn channels(&self) -> &[ByteMatrix] {
        &self.channels
    }

    /// Redraw every channel's lattice and replace all matrices.
    pub fn regenerate(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        self.channels = self.fields.iter().map(NoiseField::materialize).collect();
    }

    /// Resolved pixel at `(x, y)`: palette lookup first, then blending.
    pub fn pixel(&self, x: usize, y: usize) -> Result<PixelValue> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfRange { x, y, width: self.width, height: self.height });
        }
        let mut bytes = [0u8; 4];
        for (slot, channel) in bytes.iter_mut().zip(&self.channels) {
            *slot = channel.get(x, y);
        }
        let value = self.layout.compose(&bytes[..self.channels.len()]);
        Ok(match &self.blend {
            Some(blend) => blend.apply(value),
            None => value,
        })
    }

    pub fn mono(&self, x: usize, y: usize) -> Result<String> {
        self.pixel(x, y).map(format::to_mono)
    }

    pub fn rgb(&self, x: usize, y: usize) -> Result<String> {
        self.pixel(x, y).map(format::to_rgb)
    }

    pub fn rgba(&self, x: usize, y: usize, alpha: Option<f64>) -> Result<String> {
        self.pixel(x, y).map(|p| format::to_rgba(p, alpha))
    }
}
