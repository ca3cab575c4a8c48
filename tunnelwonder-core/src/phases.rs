//! Phase accumulators.
//!
//! Animation never reads wall-clock time. The driver integrates
//! `phase += speed * dt` every tick, so changing a speed continues smoothly
//! from the current phase instead of jumping to `speed * total_time`.

use crate::{ParameterSnapshot, KERNEL_CONFIG};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Running totals carried from frame to frame by the driver.
///
/// Stored as `f64` because they grow without bound. The depth phase never
/// reaches the kernel as one number: [`for_frame`](Self::for_frame) splits it
/// into a whole layer index and a small offset inside that layer, so the
/// `f32` math downstream only ever sees distances of a few layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseAccumulators {
    pub depth_phase: f64,
    pub rotation_phase: f64,
    pub plane_rotation_phase: f64,
    pub color_phase: f64,
}

/// Phases narrowed to the kernel's precision for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FramePhases {
    /// Index of the last layer plane at or behind the camera.
    pub base_layer: f64,
    /// Camera distance past `base_layer`, in `[0, layer_spacing]`.
    pub layer_offset: f32,
    /// Post-fold rotation, wrapped to one turn.
    pub rotation: f32,
    pub plane_rotation: f32,
    pub color: f32,
}

impl PhaseAccumulators {
    /// Start the tunnel at a given depth with all other phases at zero.
    pub fn at_depth(depth: f64) -> Self {
        Self {
            depth_phase: depth,
            ..Default::default()
        }
    }

    /// Integrate one tick of `elapsed_seconds` using the snapshot's speeds.
    pub fn advance(&mut self, snapshot: &ParameterSnapshot, elapsed_seconds: f64) {
        self.depth_phase += snapshot.fly_speed as f64 * elapsed_seconds;
        self.rotation_phase += snapshot.rotation_speed as f64 * elapsed_seconds;
        self.plane_rotation_phase += snapshot.plane_rotation_speed as f64 * elapsed_seconds;
        self.color_phase += snapshot.color_speed as f64 * elapsed_seconds;
    }

    /// Snapshot of the current phases for one frame.
    pub fn for_frame(&self) -> FramePhases {
        FramePhases {
            rotation: self.rotation_phase.rem_euclid(TAU) as f32,
            plane_rotation: self.plane_rotation_phase as f32,
            color: self.color_phase as f32,
            ..FramePhases::at_depth(self.depth_phase)
        }
    }
}

impl FramePhases {
    /// Phases for a camera at `depth` with every other phase at zero.
    pub fn at_depth(depth: f64) -> Self {
        if !depth.is_finite() {
            return Self::default();
        }
        let spacing = KERNEL_CONFIG.layer_spacing as f64;
        let base_layer = (depth / spacing).floor();
        let offset = (depth - base_layer * spacing).clamp(0.0, spacing);
        Self {
            base_layer,
            layer_offset: offset as f32,
            ..Default::default()
        }
    }

    /// Depth of the base layer plane along the tunnel axis.
    pub fn origin(&self) -> f64 {
        self.base_layer * KERNEL_CONFIG.layer_spacing as f64
    }

    /// Absolute camera depth.
    pub fn depth(&self) -> f64 {
        self.origin() + self.layer_offset as f64
    }
}
