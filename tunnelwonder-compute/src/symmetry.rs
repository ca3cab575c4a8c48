//! Kaleidoscope fold with smoothed seams.
//!
//! The plane is split into `segment_count` wedges of `2π / segment_count`.
//! Each wedge is a mirror pair: two half-wedge cells, the second a reflection
//! of the first. Reflections meet at the cell seams, where a smooth absolute
//! value replaces the hard `abs()` crease.

use crate::math::{mix, sign};
use glam::Vec2;
use std::f32::consts::TAU;

/// Smallest segment count the folder divides by.
const MIN_SEGMENTS: f32 = 1e-3;

/// Seam smoothing width for a segment count. Narrow wedges need less.
pub fn smoothing_for(segment_count: f32) -> f32 {
    0.05 * 20.0 / segment_count.abs().max(MIN_SEGMENTS)
}

/// Polynomial smooth minimum with blend width `k`.
pub fn pmin(a: f32, b: f32, k: f32) -> f32 {
    if k <= 0.0 {
        return a.min(b);
    }
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    mix(b, a, h) - k * h * (1.0 - h)
}

pub fn pmax(a: f32, b: f32, k: f32) -> f32 {
    -pmin(-a, -b, k)
}

/// Smooth absolute value. Equals `|a|` once `|a| >= k / 2`.
pub fn pabs(a: f32, k: f32) -> f32 {
    pmax(a, -a, k)
}

/// Wrap `p` into `[-size/2, size/2)`, mirroring every other cell.
/// Returns the wrapped value and the cell index.
fn mod_mirror(p: f32, size: f32) -> (f32, i32) {
    let half = size * 0.5;
    let cell = ((p + half) / size).floor();
    let local = (p + half).rem_euclid(size) - half;
    let mirror = cell.rem_euclid(2.0) * 2.0 - 1.0;
    (local * mirror, cell as i32)
}

fn to_polar(p: Vec2) -> (f32, f32) {
    (p.length(), p.y.atan2(p.x))
}

fn to_rect(radius: f32, angle: f32) -> Vec2 {
    Vec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Fold `point` into the fundamental cell of the kaleidoscope.
///
/// The folded angle lies within `[-π / (2n), π / (2n)]` (inside the wedge
/// range `[-π/n, π/n]`), the radius is preserved, and the result repeats every
/// `2π / n`. Returns the folded point and the index of the mirror cell it came
/// from. The segment count is used as given; keeping it an even integer is the
/// caller's job.
pub fn fold(point: Vec2, segment_count: f32, smoothing: f32) -> (Vec2, i32) {
    let n = segment_count.abs();
    if !n.is_finite() || n < MIN_SEGMENTS {
        return (point, 0);
    }

    let mirror_width = 0.5 * TAU / n;
    let edge = 0.5 * mirror_width;

    let (radius, angle) = to_polar(point);
    // The origin is fixed by every fold and has no meaningful angle
    if radius <= 0.0 {
        return (Vec2::ZERO, 0);
    }
    let (local, cell) = mod_mirror(angle, mirror_width);
    let folded = edge - pabs(edge - local.abs(), smoothing);

    (to_rect(radius, sign(local) * folded), cell)
}
