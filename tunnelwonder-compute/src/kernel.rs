//! Per-frame pixel kernel: pixel coordinate in, display color out.

use crate::compositor::LayerCompositor;
use crate::post::PalettePostProcessor;
use crate::ray::{pixel_step, screen_point, Ray};
use glam::{Vec2, Vec3};
use tunnelwonder_core::{FramePhases, ParameterSnapshot};

/// Immutable context shared by every pixel of one frame.
///
/// Holds nothing mutable, so it can be borrowed from any number of threads.
#[derive(Clone, Copy, Debug)]
pub struct TunnelKernel<'a> {
    compositor: LayerCompositor<'a>,
    post: PalettePostProcessor,
    resolution: (u32, u32),
    roll: f32,
    step: Vec2,
}

impl<'a> TunnelKernel<'a> {
    pub fn new(
        snapshot: &'a ParameterSnapshot,
        phases: &FramePhases,
        resolution: (u32, u32),
    ) -> Self {
        let segments = snapshot.kaleidoscope_segments;
        if segments < 4.0 || segments % 2.0 != 0.0 {
            log::warn!(
                "kaleidoscope_segments = {segments} is not an even integer >= 4; seams will show"
            );
        }

        Self {
            compositor: LayerCompositor::new(snapshot, *phases),
            post: PalettePostProcessor::from_snapshot(snapshot, phases.color),
            resolution,
            roll: snapshot.camera_roll,
            step: pixel_step(resolution),
        }
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    pub fn compositor(&self) -> &LayerCompositor<'a> {
        &self.compositor
    }

    /// View ray through the center of pixel `(px, py)`.
    pub fn ray_for(&self, px: u32, py: u32) -> Ray {
        let screen = screen_point(px, py, self.resolution, self.roll);
        Ray::new(self.compositor.camera(), screen, self.step)
    }

    /// Final color of pixel `(px, py)`, each channel in `[0, 1]`.
    pub fn shade_pixel(&self, px: u32, py: u32) -> Vec3 {
        let ray = self.ray_for(px, py);
        let scene = self.compositor.render_pixel(&ray);
        let (width, height) = self.resolution;
        let uv = Vec2::new(
            (px as f32 + 0.5) / width.max(1) as f32,
            (py as f32 + 0.5) / height.max(1) as f32,
        );
        self.post.post_process(scene, uv)
    }
}

/// Quantize a display color to RGBA8 with opaque alpha.
pub fn to_rgba8(color: Vec3) -> [u8; 4] {
    let [r, g, b] = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round().to_array();
    [r as u8, g as u8, b as u8, 255]
}
