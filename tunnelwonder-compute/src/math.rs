//! Small scalar and vector helpers shared by the kernel stages.

use glam::{Vec2, Vec3};

/// Hermite smoothstep. Edges may be given in either order; equal edges
/// degrade to a hard step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span.abs() < f32::EPSILON {
        return if (x - edge0) * span.signum() >= 0.0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Sign with `sign(0) == 0`.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Fractional part, always in `[0, 1)` for finite input.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Rational approximation of `tanh`, clamped to `[-1, 1]`.
#[inline]
pub fn tanh_approx(x: f32) -> f32 {
    let x2 = x * x;
    (x * (27.0 + x2) / (27.0 + 9.0 * x2)).clamp(-1.0, 1.0)
}

/// Rotate a 2D point counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(p: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(p)
}

/// Replace non-finite components with zero.
#[inline]
pub fn sanitize(v: Vec3) -> Vec3 {
    let finite_or_zero = |c: f32| if c.is_finite() { c } else { 0.0 };
    Vec3::new(finite_or_zero(v.x), finite_or_zero(v.y), finite_or_zero(v.z))
}
