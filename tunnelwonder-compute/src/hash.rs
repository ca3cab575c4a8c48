//! Stateless hashes for per-cell and per-layer variation.
//!
//! Evaluated in f64 through `libm` so the same inputs give bit-identical
//! results on every thread and every platform.

use glam::Vec2;

/// Largest f32 strictly below 1.0.
const ONE_BELOW: f32 = 1.0 - f32::EPSILON;

#[inline]
fn fract64(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn to_unit(x: f64) -> f32 {
    if x.is_finite() {
        (fract64(x) as f32).min(ONE_BELOW)
    } else {
        0.0
    }
}

#[inline]
fn hash64(n: f64) -> f32 {
    to_unit(libm::sin(n * 12.9898) * 13758.5453)
}

/// Hash a scalar to `[0, 1)`.
pub fn hash1(n: f32) -> f32 {
    hash64(n as f64)
}

/// Hash a 2D point (typically integral cell coordinates) to `[0, 1)`.
pub fn hash2(p: Vec2) -> f32 {
    let a = p.x as f64 * 127.1 + p.y as f64 * 311.7;
    to_unit(libm::sin(a) * 43758.5453123)
}

/// Independent-looking values derived from one per-layer hash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerHashes {
    /// Angular offset of the post-fold rotation, in turns.
    pub angle: f32,
    /// Selects the cell offset so each layer shows different tiles.
    pub cell_offset: f32,
    /// Per-layer plane rotation multiplier, in `[-0.5, 0.5)`.
    pub spin: f32,
}

impl LayerHashes {
    /// Hashes for absolute layer `index`. Taken as `f64` so layers far down
    /// the tunnel stay distinct.
    pub fn for_layer(index: f64) -> Self {
        let h = hash64(index) as f64;
        Self {
            angle: to_unit(1777.0 * h),
            cell_offset: to_unit(2087.0 * h),
            spin: to_unit(3499.0 * h) - 0.5,
        }
    }
}
