//! Display mapping applied to the composited scene color.

use crate::math::{mix3, sanitize};
use glam::{Vec2, Vec3};
use tunnelwonder_core::{CosinePalette, ParameterSnapshot};

/// Luminance-ish weights used by the desaturation step.
const GREY: Vec3 = Vec3::splat(0.33);

/// Maps a linear scene color to the final on-screen color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PalettePostProcessor {
    pub palette: Option<CosinePalette>,
    pub color_phase: f32,
    pub intensity: f32,
    pub invert: bool,
}

impl PalettePostProcessor {
    pub fn from_snapshot(snapshot: &ParameterSnapshot, color_phase: f32) -> Self {
        Self {
            palette: snapshot.use_color_palette.then(|| snapshot.palette()),
            color_phase,
            intensity: snapshot.color_intensity,
            invert: snapshot.invert_colors,
        }
    }

    /// Post-process `color` for the pixel at `uv` (`[0, 1]²`, origin at a
    /// corner). The result is finite and inside `[0, 1]`.
    pub fn post_process(&self, color: Vec3, uv: Vec2) -> Vec3 {
        let mut col = sanitize(color);

        if let Some(palette) = &self.palette {
            let magnitude = col.length();
            col = palette.eval(magnitude + self.color_phase) * magnitude;
        }

        col = col.clamp(Vec3::ZERO, Vec3::ONE).powf(1.0 / 2.2);
        col = 0.6 * col + 0.4 * col * col * (3.0 - 2.0 * col);
        col = mix3(col, Vec3::splat(col.dot(GREY)), -0.4);
        col *= vignette(uv);
        col *= self.intensity;
        col = sanitize(col).clamp(Vec3::ZERO, Vec3::ONE);

        if self.invert {
            Vec3::ONE - col
        } else {
            col
        }
    }
}

/// Darkens toward the corners and slightly lifts the center.
fn vignette(uv: Vec2) -> f32 {
    let q = uv.clamp(Vec2::ZERO, Vec2::ONE);
    0.5 + 0.5 * (19.0 * q.x * q.y * (1.0 - q.x) * (1.0 - q.y)).powf(0.7)
}
