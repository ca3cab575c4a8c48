pub mod config;
pub mod error;
pub mod palette;
pub mod params;
pub mod phases;
pub mod pixel_rect;

pub use config::{KernelConfig, KERNEL_CONFIG};
pub use error::ParamError;
pub use palette::CosinePalette;
pub use params::{snap_segments, ParameterSnapshot};
pub use phases::{FramePhases, PhaseAccumulators};
pub use pixel_rect::PixelRect;
