//! Camera path through the tunnel and the camera basis derived from it.
//!
//! Derivatives are central finite differences of [`PathGenerator::position`],
//! so the path formula can change without re-deriving anything by hand.
//!
//! Positions are local to [`PathGenerator::origin`]: the `z` a caller passes
//! and gets back is measured from that depth, while the curve itself is
//! evaluated at the absolute depth in `f64`.

use glam::{Vec2, Vec3};
use tunnelwonder_core::{ParameterSnapshot, KERNEL_CONFIG};

const FALLBACK_FORWARD: Vec3 = Vec3::Z;
const WORLD_UP: Vec3 = Vec3::Y;

/// Path position and derivatives as a function of depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathGenerator {
    /// Amplitude of the curved component.
    pub scale: f32,
    /// Blend between straight (+1), base curve (0) and exaggerated curve (< 0).
    pub stability: f32,
    /// Lateral drift per unit depth.
    pub tilt: Vec2,
    /// Finite-difference step.
    pub eps: f32,
    /// Absolute depth that local `z = 0` corresponds to.
    pub origin: f64,
}

impl PathGenerator {
    pub fn from_snapshot(snapshot: &ParameterSnapshot) -> Self {
        Self {
            scale: snapshot.path_scale,
            stability: snapshot.path_stability,
            tilt: Vec2::new(snapshot.camera_tilt_x, snapshot.camera_tilt_y),
            eps: KERNEL_CONFIG.derivative_eps,
            origin: 0.0,
        }
    }

    /// Same path, with local coordinates measured from depth `origin`.
    pub fn with_origin(self, origin: f64) -> Self {
        Self { origin, ..self }
    }

    /// Weight of the curved component for the current stability.
    fn curve_weight(&self) -> f32 {
        let s = self.stability;
        if s >= 0.0 {
            1.0 - s.min(1.0)
        } else {
            1.0 + 2.0 * s.abs()
        }
    }

    /// Base curve: two incommensurate sine/cosine pairs, at absolute depth.
    fn curve(&self, depth: f64) -> Vec2 {
        let x = depth.cos() + (depth * 0.75_f64.sqrt()).cos();
        let y = (depth * std::f64::consts::SQRT_2).sin() + (depth * 0.5_f64.sqrt()).sin();
        -self.scale * Vec2::new(x as f32, y as f32)
    }

    /// Path point at local depth `z`. Tilt drift is counted from the origin,
    /// which only translates the whole scene.
    pub fn position(&self, z: f32) -> Vec3 {
        let xy = self.curve(self.origin + z as f64) * self.curve_weight() + self.tilt * z;
        xy.extend(z)
    }

    pub fn velocity(&self, z: f32) -> Vec3 {
        (self.position(z + self.eps) - self.position(z - self.eps)) / (2.0 * self.eps)
    }

    pub fn curvature(&self, z: f32) -> Vec3 {
        (self.velocity(z + self.eps) - self.velocity(z - self.eps)) / (2.0 * self.eps)
    }

    /// Camera placed on the path at `depth`, banking into turns.
    pub fn camera_frame(&self, depth: f32) -> CameraFrame {
        let position = self.position(depth);
        let forward = self
            .velocity(depth)
            .try_normalize()
            .unwrap_or(FALLBACK_FORWARD);

        let banked_up = (WORLD_UP + self.curvature(depth))
            .try_normalize()
            .unwrap_or(WORLD_UP);
        let right = banked_up
            .cross(forward)
            .try_normalize()
            .or_else(|| WORLD_UP.cross(forward).try_normalize())
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        let up = right.cross(forward);

        CameraFrame {
            position,
            forward,
            right,
            up,
        }
    }
}

/// Orthonormal camera basis at a point on the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}
