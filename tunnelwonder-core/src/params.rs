//! Per-frame parameter snapshot consumed by the renderer.
//!
//! The snapshot is owned and edited by whoever drives the renderer. The kernel
//! only ever borrows it for the duration of one frame. Enforcing the caller
//! invariants (even segment counts, sane layer counts) happens here, before a
//! snapshot reaches the kernel, via [`ParameterSnapshot::normalized`] and
//! [`ParameterSnapshot::validate`].

use crate::{CosinePalette, KernelConfig, ParamError};
use serde::{Deserialize, Serialize};

/// Immutable set of named rendering parameters for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSnapshot {
    /// Depth units per second. Integrated into `depth_phase` by the driver.
    pub fly_speed: f32,
    /// Radians per second of the post-fold rotation.
    pub rotation_speed: f32,
    /// Radians per second of the per-layer pre-fold rotation.
    pub plane_rotation_speed: f32,
    /// Palette cycles per second.
    pub color_speed: f32,
    /// Strength of the fine-line texture inside filled regions (0 disables it).
    pub contrast: f32,
    /// Number of kaleidoscope wedges. Callers keep this an even integer >= 4.
    pub kaleidoscope_segments: f32,
    /// Radius of the Truchet arcs, in cell units.
    pub truchet_radius: f32,
    /// Radius of the optional occluding disc at the tunnel center (0 disables it).
    pub center_fill_radius: f32,
    /// Pattern scale; smaller values show more cells per layer.
    pub zoom_level: f32,
    /// Final brightness multiplier.
    pub color_intensity: f32,
    pub camera_tilt_x: f32,
    pub camera_tilt_y: f32,
    /// Screen-space roll in radians.
    pub camera_roll: f32,
    /// +1 straight path, 0 base curve, negative values exaggerate the curve.
    pub path_stability: f32,
    /// Amplitude of the curved path.
    pub path_scale: f32,
    /// Number of depth layers composited per pixel.
    pub layer_count: u32,
    pub palette_a: [f32; 3],
    pub palette_b: [f32; 3],
    pub palette_c: [f32; 3],
    pub palette_d: [f32; 3],
    pub use_color_palette: bool,
    pub invert_colors: bool,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        let palette = CosinePalette::default();
        Self {
            fly_speed: 0.25,
            rotation_speed: 0.025,
            plane_rotation_speed: 0.5,
            color_speed: 0.1,
            contrast: 1.0,
            kaleidoscope_segments: 10.0,
            truchet_radius: 0.35,
            center_fill_radius: 0.0,
            zoom_level: 0.3,
            color_intensity: 1.0,
            camera_tilt_x: 0.0,
            camera_tilt_y: 0.0,
            camera_roll: 0.0,
            path_stability: 0.0,
            path_scale: 0.075,
            layer_count: 16,
            palette_a: palette.a.to_array(),
            palette_b: palette.b.to_array(),
            palette_c: palette.c.to_array(),
            palette_d: palette.d.to_array(),
            use_color_palette: false,
            invert_colors: false,
        }
    }
}

/// Round a requested segment count to the nearest even integer, minimum 4.
///
/// Non-integral counts leave a seam where the last wedge meets the first.
pub fn snap_segments(value: f32) -> f32 {
    if !value.is_finite() {
        return 4.0;
    }
    ((value / 2.0).round() * 2.0).max(4.0)
}

impl ParameterSnapshot {
    /// Parse a snapshot from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Palette built from the four coefficient vectors.
    pub fn palette(&self) -> CosinePalette {
        CosinePalette::new(
            self.palette_a,
            self.palette_b,
            self.palette_c,
            self.palette_d,
        )
    }

    /// Copy with the caller invariants enforced: segments snapped to an even
    /// integer >= 4 and `layer_count` clamped to `1..=MAX_LAYERS`.
    pub fn normalized(&self) -> Self {
        Self {
            kaleidoscope_segments: snap_segments(self.kaleidoscope_segments),
            layer_count: self.layer_count.clamp(1, KernelConfig::MAX_LAYERS),
            ..self.clone()
        }
    }

    /// Check the caller invariants without modifying anything.
    pub fn validate(&self) -> Result<(), ParamError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ParamError::NonFinite { field, value });
            }
        }

        let segments = self.kaleidoscope_segments;
        if segments < 4.0 || segments.fract() != 0.0 || (segments as i64) % 2 != 0 {
            return Err(ParamError::InvalidSegments(segments));
        }

        if self.layer_count == 0 || self.layer_count > KernelConfig::MAX_LAYERS {
            return Err(ParamError::LayerCountOutOfRange {
                value: self.layer_count,
                max: KernelConfig::MAX_LAYERS,
            });
        }

        Ok(())
    }

    fn float_fields(&self) -> Vec<(&'static str, f32)> {
        let mut fields = vec![
            ("fly_speed", self.fly_speed),
            ("rotation_speed", self.rotation_speed),
            ("plane_rotation_speed", self.plane_rotation_speed),
            ("color_speed", self.color_speed),
            ("contrast", self.contrast),
            ("kaleidoscope_segments", self.kaleidoscope_segments),
            ("truchet_radius", self.truchet_radius),
            ("center_fill_radius", self.center_fill_radius),
            ("zoom_level", self.zoom_level),
            ("color_intensity", self.color_intensity),
            ("camera_tilt_x", self.camera_tilt_x),
            ("camera_tilt_y", self.camera_tilt_y),
            ("camera_roll", self.camera_roll),
            ("path_stability", self.path_stability),
            ("path_scale", self.path_scale),
        ];
        for (name, coefficients) in [
            ("palette_a", self.palette_a),
            ("palette_b", self.palette_b),
            ("palette_c", self.palette_c),
            ("palette_d", self.palette_d),
        ] {
            fields.extend(coefficients.iter().map(|&v| (name, v)));
        }
        fields
    }
}
