use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A width × height grid of bytes, row-major (`data[y * width + x]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteMatrix {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl ByteMatrix {
    /// Create a matrix filled with `fill`.
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self { data: vec![fill; width * height], width, height }
    }

    /// Build a matrix by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { data, width, height }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: u8) {
        self.data[y * self.width + x] = val;
    }

    /// Bounds-checked read.
    pub fn try_get(&self, x: usize, y: usize) -> Result<u8> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfRange { x, y, width: self.width, height: self.height });
        }
        Ok(self.get(x, y))
    }

    /// `(min, max)` over all cells, `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(u8, u8)> {
        let min = *self.data.iter().min()?;
        let max = *self.data.iter().max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let m = ByteMatrix::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(m.data, vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(m.get(2, 1), 12);
    }

    #[test]
    fn try_get_rejects_out_of_bounds() {
        let m = ByteMatrix::new(2, 2, 7);
        assert_eq!(m.try_get(1, 1), Ok(7));
        assert_eq!(
            m.try_get(2, 0),
            Err(Error::IndexOutOfRange { x: 2, y: 0, width: 2, height: 2 })
        );
        assert!(m.try_get(0, 5).is_err());
    }

    #[test]
    fn min_max_of_empty_is_none() {
        assert_eq!(ByteMatrix::new(0, 0, 0).min_max(), None);
        let mut m = ByteMatrix::new(2, 2, 40);
        m.set(1, 0, 200);
        m.set(0, 1, 3);
        assert_eq!(m.min_max(), Some((3, 200)));
    }
}
