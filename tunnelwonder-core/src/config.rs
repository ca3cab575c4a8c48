//! Kernel tuning constants.
//!
//! These are fixed per build and shared by every pixel of every frame. The
//! values that a user is expected to change live in `ParameterSnapshot`
//! instead.

/// Fixed constants for the tunnel kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelConfig {
    /// Distance between consecutive depth layers along the tunnel axis.
    pub layer_spacing: f32,
    /// Step used by the central finite differences of the camera path.
    pub derivative_eps: f32,
    /// Accumulated alpha above which further layers are skipped.
    pub alpha_cutoff: f32,
    /// Number of layers (counted back from the farthest) that fade into the sky.
    pub far_fade_layers: u32,
    /// Depth over which a layer entering the lens fades in, as a fraction of spacing.
    pub near_fade_fraction: f32,
    /// Pattern stroke half width, in pattern units before zoom.
    pub line_width: f32,
    /// Angular frequency of the fine-line texture inside filled regions.
    pub fine_line_frequency: f32,
    /// Exponent of the bright spot straight ahead in the sky gradient.
    pub sky_exponent: f32,
    /// Smallest zoom magnitude the kernel divides by.
    pub min_zoom: f32,
    /// Alpha of the center fill disc.
    pub center_fill_alpha: f32,
}

impl KernelConfig {
    /// Hard upper bound on `ParameterSnapshot::layer_count`.
    pub const MAX_LAYERS: u32 = 32;

    /// Depth at which layers have completely faded into the sky.
    pub fn far_fade_end(&self, layer_count: u32) -> f32 {
        self.layer_spacing * layer_count as f32
    }

    /// Depth at which layers start fading into the sky.
    pub fn far_fade_start(&self, layer_count: u32) -> f32 {
        self.layer_spacing * layer_count.saturating_sub(self.far_fade_layers) as f32
    }

    /// Depth over which a layer right in front of the camera fades in.
    pub fn near_fade_distance(&self) -> f32 {
        self.layer_spacing * self.near_fade_fraction
    }
}

/// Canonical kernel constants.
pub static KERNEL_CONFIG: KernelConfig = KernelConfig {
    layer_spacing: 0.2,
    derivative_eps: 0.1,
    alpha_cutoff: 0.95,
    far_fade_layers: 5,
    near_fade_fraction: 0.1,
    line_width: 0.025,
    fine_line_frequency: 100.0 * std::f32::consts::PI,
    sky_exponent: 20.0,
    min_zoom: 1e-4,
    center_fill_alpha: 0.98,
};
