//! Render a channel stack into a BMP data URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;

use crate::bitmap;
use crate::channels::ChannelStack;
use crate::error::Result;

pub const DATA_URL_PREFIX: &str = "data:image/bmp;base64,";

/// Row-major RGB bytes for every cell, top row first. Alpha is dropped.
pub fn rgb_buffer(stack: &ChannelStack) -> Result<Vec<u8>> {
    let (width, height) = (stack.width(), stack.height());
    let mut data = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let c = stack.pixel(x, y)?.normalize();
            let idx = (y * width + x) * 3;
            data[idx..idx + 3].copy_from_slice(&[c.r, c.g, c.b]);
        }
    }
    Ok(data)
}

pub fn bmp_bytes(stack: &ChannelStack) -> Result<Vec<u8>> {
    let rgb = rgb_buffer(stack)?;
    let bmp = bitmap::encode(stack.width(), stack.height(), &rgb)?;
    debug!("encoded {}x{} bitmap ({} bytes)", stack.width(), stack.height(), bmp.len());
    Ok(bmp)
}

pub fn bmp_base64(stack: &ChannelStack) -> Result<String> {
    Ok(STANDARD.encode(bmp_bytes(stack)?))
}

/// `data:image/bmp;base64,…` for the whole stack.
pub fn data_url(stack: &ChannelStack) -> Result<String> {
    Ok(format!("{DATA_URL_PREFIX}{}", bmp_base64(stack)?))
}
