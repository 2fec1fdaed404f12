//! Uncompressed 24-bit BMP writer.
//!
//! Layout: 14-byte file header, 40-byte `BITMAPINFOHEADER`, then BGR rows
//! bottom-up, each padded with zeros to a multiple of four bytes.

use crate::error::{Error, Result};

pub const FILE_HEADER_SIZE: usize = 14;
pub const DIB_HEADER_SIZE: usize = 40;
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + DIB_HEADER_SIZE;
const BITS_PER_PIXEL: u16 = 24;

/// Zero bytes appended to each row of `width` pixels.
#[inline]
pub fn row_padding(width: usize) -> usize {
    (4 - (width * 3) % 4) % 4
}

/// Total file size in bytes for a `width × height` image.
pub fn file_size(width: usize, height: usize) -> usize {
    PIXEL_DATA_OFFSET + (width * 3 + row_padding(width)) * height
}

/// Encode `rgb` (row-major, top row first, three bytes per pixel) as a BMP.
pub fn encode(width: usize, height: usize, rgb: &[u8]) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    if rgb.len() != width * height * 3 {
        return Err(Error::InvalidConfiguration(format!(
            "pixel buffer holds {} bytes, {width}x{height} RGB needs {}",
            rgb.len(),
            width * height * 3
        )));
    }
    let too_large = || Error::ImageTooLarge { width, height };
    let w = i32::try_from(width).map_err(|_| too_large())?;
    let h = i32::try_from(height).map_err(|_| too_large())?;
    let total = u32::try_from(file_size(width, height)).map_err(|_| too_large())?;
    let image_size = total - PIXEL_DATA_OFFSET as u32;

    let mut out = Vec::with_capacity(total as usize);

    // File header.
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&total.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(PIXEL_DATA_OFFSET as u32).to_le_bytes());

    // DIB header.
    out.extend_from_slice(&(DIB_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&w.to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // no compression
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    let padding = [0u8; 3];
    for row in rgb.chunks_exact(width * 3).rev() {
        for px in row.chunks_exact(3) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        out.extend_from_slice(&padding[..row_padding(width)]);
    }

    debug_assert_eq!(out.len(), total as usize);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(buf: &[u8], off: usize) -> u32 {
        u32::from_le_bytes(buf[off..off + 4].try_into().unwrap())
    }

    fn u16_at(buf: &[u8], off: usize) -> u16 {
        u16::from_le_bytes(buf[off..off + 2].try_into().unwrap())
    }

    #[test]
    fn padding_aligns_rows_to_four_bytes() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        for w in 1..20 {
            assert_eq!((w * 3 + row_padding(w)) % 4, 0);
        }
    }

    #[test]
    fn headers_are_well_formed() {
        let bmp = encode(2, 2, &[0u8; 12]).unwrap();
        assert_eq!(bmp.len(), 14 + 40 + (2 * 3 + 2) * 2);
        assert_eq!(&bmp[..2], &[0x42, 0x4D]);
        assert_eq!(u32_at(&bmp, 2) as usize, bmp.len());
        assert_eq!(u32_at(&bmp, 10), 54);
        assert_eq!(u32_at(&bmp, 14), 40);
        assert_eq!(u32_at(&bmp, 18), 2);
        assert_eq!(u32_at(&bmp, 22), 2);
        assert_eq!(u16_at(&bmp, 26), 1);
        assert_eq!(u16_at(&bmp, 28), 24);
        assert_eq!(u32_at(&bmp, 30), 0);
        assert_eq!(u32_at(&bmp, 34) as usize, bmp.len() - 54);
        assert!(bmp[38..54].iter().all(|&b| b == 0));
    }

    #[test]
    fn rows_are_bottom_up_bgr_with_padding() {
        // Top row: red, green. Bottom row: blue, white.
        let rgb = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let bmp = encode(2, 2, &rgb).unwrap();
        let px = &bmp[54..];
        assert_eq!(&px[..8], &[255, 0, 0, 255, 255, 255, 0, 0]);
        assert_eq!(&px[8..16], &[0, 0, 255, 0, 255, 0, 0, 0]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(matches!(encode(2, 2, &[0u8; 11]), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(encode(0, 2, &[]), Err(Error::InvalidDimension { .. })));
    }
}
