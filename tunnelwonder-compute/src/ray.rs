//! Primary rays and the pixel-to-screen mapping.

use crate::math::{rotate, tanh_approx};
use crate::path::CameraFrame;
use glam::{Vec2, Vec3};

/// Map a pixel to screen coordinates.
///
/// The short axis spans `[-1, 1]`, the long axis is stretched by the aspect
/// ratio, and the result is rolled by `roll` radians around the screen center.
/// Pixel centers are sampled, so `(0, 0)` maps slightly inside the corner.
pub fn screen_point(px: u32, py: u32, resolution: (u32, u32), roll: f32) -> Vec2 {
    let (width, height) = (resolution.0.max(1) as f32, resolution.1.max(1) as f32);
    let mut p = Vec2::new(
        -1.0 + 2.0 * (px as f32 + 0.5) / width,
        -1.0 + 2.0 * (py as f32 + 0.5) / height,
    );
    p.x *= width / height;
    rotate(p, roll)
}

/// Screen-space step to the neighbouring pixel, used to estimate the
/// anti-aliasing width of every layer the ray hits.
pub fn pixel_step(resolution: (u32, u32)) -> Vec2 {
    Vec2::new(
        1.0 / resolution.0.max(1) as f32,
        1.0 / resolution.1.max(1) as f32,
    )
}

/// View ray for one pixel plus a ray through a nearby screen point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub neighbor: Vec3,
}

impl Ray {
    /// Build the ray through `screen` for a camera at `frame`.
    ///
    /// The focal length grows toward the screen edges (`2 + tanh(|p|)`), which
    /// pulls the periphery in and gives the tunnel its fisheye bulge.
    pub fn new(frame: &CameraFrame, screen: Vec2, step: Vec2) -> Self {
        let focal = 2.0 + tanh_approx(screen.length());
        let direction_for = |p: Vec2| {
            (p.x * frame.right + p.y * frame.up + focal * frame.forward)
                .try_normalize()
                .unwrap_or(frame.forward)
        };

        Self {
            origin: frame.position,
            direction: direction_for(screen),
            neighbor: direction_for(screen + step),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    pub fn neighbor_at(&self, t: f32) -> Vec3 {
        self.origin + self.neighbor * t
    }
}
