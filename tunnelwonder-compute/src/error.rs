//! Render error types.

use thiserror::Error;
use tunnelwonder_core::ParamError;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParamError),

    #[error("Render cancelled after {completed_tiles} of {total_tiles} tiles")]
    Cancelled {
        completed_tiles: u32,
        total_tiles: u32,
    },
}
