pub mod cancellation;
pub mod compositor;
pub mod error;
pub mod frame;
pub mod hash;
pub mod kernel;
pub mod math;
pub mod path;
pub mod pattern;
pub mod post;
pub mod progress;
pub mod ray;
pub mod symmetry;
pub mod tile_render;
pub mod tiles;

pub use cancellation::{AtomicBoolChecker, CancellationChecker, NeverCancel};
pub use compositor::{alpha_blend, LayerCompositor, LayerSample};
pub use error::RenderError;
pub use frame::{Frame, FrameRenderer};
pub use hash::LayerHashes;
pub use kernel::{to_rgba8, TunnelKernel};
pub use path::{CameraFrame, PathGenerator};
pub use pattern::{PatternSample, TileVariant};
pub use post::PalettePostProcessor;
pub use progress::RenderProgress;
pub use ray::Ray;
pub use symmetry::fold;
pub use tile_render::render_tile;
pub use tiles::{calculate_tile_size, generate_tiles};

// Re-export core types for convenience
pub use tunnelwonder_core::*;
