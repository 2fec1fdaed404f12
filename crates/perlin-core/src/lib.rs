//! Perlin gradient-noise textures composed into mono, RGB, RGBA or palette
//! images, exported as uncompressed bitmaps wrapped in a base64 data URL.

pub mod bitmap;
pub mod channels;
pub mod color;
pub mod error;
pub mod export;
pub mod format;
pub mod noise;
pub mod params;
pub mod pixel;

pub use channels::{ChannelLayout, ChannelStack};
pub use error::{Error, Result};
pub use noise::{ByteMatrix, NoiseConfig, NoiseField};
pub use params::{BlendParams, MatrixType, TextureParams};
pub use pixel::PixelValue;
