//! Classic 2D gradient (Perlin) noise over a lattice of random unit vectors.
//!
//! A [`NoiseField`] owns its lattice and its own RNG stream, so fields built
//! side by side never share random state. Sampling is read-only; only
//! [`NoiseField::reset`] touches the lattice after construction.

pub mod matrix;

use std::f64::consts::TAU;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
pub use matrix::ByteMatrix;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Shape and post-processing of one noise field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub width: usize,
    pub height: usize,
    /// Stretch one 2×2 lattice cell over the whole matrix instead of giving
    /// every output cell its own lattice cell.
    #[serde(default)]
    pub single_cell: bool,
    /// Linearly stretch the materialized bytes to the full 0-255 range.
    #[serde(default = "default_rescale")]
    pub rescale: bool,
}

fn default_rescale() -> bool {
    true
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { width: 64, height: 64, single_cell: false, rescale: true }
    }
}

// ── Interpolation helpers ─────────────────────────────────────────────────────

/// Quintic easing `6t⁵ - 15t⁴ + 10t³`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// ── Lattice ───────────────────────────────────────────────────────────────────

/// A unit-length gradient direction at one lattice point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub x: f64,
    pub y: f64,
}

impl Gradient {
    fn random(rng: &mut StdRng) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        Self { x: angle.cos(), y: angle.sin() }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Gradient-noise generator for a fixed `width × height` output grid.
pub struct NoiseField {
    config: NoiseConfig,
    lattice_width: usize,
    lattice_height: usize,
    /// Row-major: `gradients[iy * lattice_width + ix]`.
    gradients: Vec<Gradient>,
    rng: StdRng,
}

impl NoiseField {
    /// Build a field seeded from OS entropy.
    pub fn new(config: NoiseConfig) -> Result<Self> {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Build a reproducible field: equal seeds give equal lattices.
    pub fn with_seed(config: NoiseConfig, seed: u64) -> Result<Self> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Build a field that draws its lattice from `rng`, now owned by the field.
    pub fn from_rng(config: NoiseConfig, rng: StdRng) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidDimension { width: config.width, height: config.height });
        }
        // Multi-cell mode keeps one extra ring of vectors so every output cell
        // can be sampled at its centre.
        let (lattice_width, lattice_height) = if config.single_cell {
            (2, 2)
        } else {
            (config.width + 2, config.height + 2)
        };
        let mut field = Self {
            config,
            lattice_width,
            lattice_height,
            gradients: Vec::with_capacity(lattice_width * lattice_height),
            rng,
        };
        field.generate();
        Ok(field)
    }

    fn generate(&mut self) {
        let n = self.lattice_width * self.lattice_height;
        let rng = &mut self.rng;
        self.gradients = (0..n).map(|_| Gradient::random(rng)).collect();
        debug!(
            "generated {}x{} gradient lattice for {}x{} field",
            self.lattice_width, self.lattice_height, self.config.width, self.config.height
        );
    }

    /// Redraw every gradient vector. Matrices materialized earlier are not
    /// touched; call [`materialize`](Self::materialize) again for new output.
    pub fn reset(&mut self) {
        self.generate();
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// `(width, height)` of the gradient lattice.
    pub fn lattice_size(&self) -> (usize, usize) {
        (self.lattice_width, self.lattice_height)
    }

    pub fn gradients(&self) -> &[Gradient] {
        &self.gradients
    }

    /// Gradient at lattice point `(ix, iy)`; indices wrap around the lattice.
    #[inline]
    pub fn gradient(&self, ix: i64, iy: i64) -> Gradient {
        let gx = ix.rem_euclid(self.lattice_width as i64) as usize;
        let gy = iy.rem_euclid(self.lattice_height as i64) as usize;
        self.gradients[gy * self.lattice_width + gx]
    }

    #[inline]
    fn dot_grid_gradient(&self, ix: i64, iy: i64, x: f64, y: f64) -> f64 {
        let g = self.gradient(ix, iy);
        (x - ix as f64) * g.x + (y - iy as f64) * g.y
    }

    /// Raw noise at a point in lattice space. Zero on every lattice point.
    ///
    /// Wrapped lookups make the noise periodic in the lattice size, so
    /// coordinates are reduced into one period first. Non-finite input gives 0.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        if !(x.is_finite() && y.is_finite()) {
            return 0.0;
        }
        let x = x.rem_euclid(self.lattice_width as f64);
        let y = y.rem_euclid(self.lattice_height as f64);
        let xf = x.floor();
        let yf = y.floor();
        let x0 = xf as i64;
        let y0 = yf as i64;
        let x1 = x0 + 1;
        let y1 = y0 + 1;

        let n00 = self.dot_grid_gradient(x0, y0, x, y);
        let n10 = self.dot_grid_gradient(x1, y0, x, y);
        let n01 = self.dot_grid_gradient(x0, y1, x, y);
        let n11 = self.dot_grid_gradient(x1, y1, x, y);

        let u = fade(x - xf);
        let v = fade(y - yf);

        lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
    }

    /// Noise at output-grid coordinates, nominally in [-1, 1].
    ///
    /// Single-cell fields map the grid onto [0, 1)²; multi-cell fields sample
    /// each integer cell at its centre.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        if self.config.single_cell {
            self.noise(x / self.config.width as f64, y / self.config.height as f64)
        } else {
            self.noise(x + 0.5, y + 0.5)
        }
    }

    /// [`sample`](Self::sample) mapped onto a byte.
    pub fn sample_byte(&self, x: f64, y: f64) -> u8 {
        let v = (256.0 * (self.sample(x, y) + 1.0) / 2.0).floor();
        // NaN casts to 0.
        v.clamp(0.0, 255.0) as u8
    }

    /// Sample every integer cell, then rescale if configured.
    pub fn materialize(&self) -> ByteMatrix {
        let mut m = ByteMatrix::from_fn(self.config.width, self.config.height, |x, y| {
            self.sample_byte(x as f64, y as f64)
        });
        if self.config.rescale {
            rescale_in_place(&mut m);
        }
        debug!("materialized {}x{} noise matrix", m.width, m.height);
        m
    }
}

/// Stretch `m` so its minimum becomes 0 and its maximum 255.
///
/// A uniform matrix has no range to stretch and becomes all zeros.
pub fn rescale_in_place(m: &mut ByteMatrix) {
    let Some((min, max)) = m.min_max() else { return };
    if min == max {
        warn!("rescale of uniform {}x{} matrix (value {min}); output is all zeros", m.width, m.height);
        m.data.fill(0);
        return;
    }
    let range = (max - min) as u32;
    for v in &mut m.data {
        *v = (255 * (*v - min) as u32 / range) as u8;
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
