//! Four-coefficient cosine palette: `a + b * cos(2π * (c * t + d))`.

use glam::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosinePalette {
    /// Offset (mid color).
    pub a: Vec3,
    /// Amplitude.
    pub b: Vec3,
    /// Frequency per channel.
    pub c: Vec3,
    /// Phase per channel.
    pub d: Vec3,
}

impl Default for CosinePalette {
    fn default() -> Self {
        Self {
            a: Vec3::splat(0.5),
            b: Vec3::splat(0.5),
            c: Vec3::ONE,
            d: Vec3::new(0.0, 0.33, 0.67),
        }
    }
}

impl CosinePalette {
    pub fn new(a: [f32; 3], b: [f32; 3], c: [f32; 3], d: [f32; 3]) -> Self {
        Self {
            a: Vec3::from_array(a),
            b: Vec3::from_array(b),
            c: Vec3::from_array(c),
            d: Vec3::from_array(d),
        }
    }

    /// Evaluate the palette at `t`. Periodic in `t` whenever `c` is integral.
    pub fn eval(&self, t: f32) -> Vec3 {
        let phase = (self.c * t + self.d) * TAU;
        self.a + self.b * Vec3::new(phase.x.cos(), phase.y.cos(), phase.z.cos())
    }
}
