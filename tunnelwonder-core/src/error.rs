//! Parameter validation errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("kaleidoscope_segments must be an even integer >= 4, got {0}")]
    InvalidSegments(f32),

    #[error("layer_count must be in 1..={max}, got {value}")]
    LayerCountOutOfRange { value: u32, max: u32 },
}
