//! Parameter loading for the render command.

use anyhow::{Context, Result};
use std::path::Path;
use tunnelwonder_core::ParameterSnapshot;

/// Load a snapshot from a JSON file, or the defaults when no file is given.
///
/// Missing fields keep their defaults. Values the kernel cannot use as given
/// (odd segment counts, layer counts out of range) are adjusted with a
/// warning, then the result is validated.
pub fn load_snapshot(path: Option<&Path>) -> Result<ParameterSnapshot> {
    let requested = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read parameters: {}", path.display()))?;
            ParameterSnapshot::from_json(&json)
                .with_context(|| format!("Failed to parse parameters: {}", path.display()))?
        }
        None => ParameterSnapshot::default(),
    };

    let snapshot = requested.normalized();
    if snapshot.kaleidoscope_segments != requested.kaleidoscope_segments {
        tracing::warn!(
            requested = requested.kaleidoscope_segments,
            used = snapshot.kaleidoscope_segments,
            "kaleidoscope_segments snapped to an even integer >= 4"
        );
    }
    if snapshot.layer_count != requested.layer_count {
        tracing::warn!(
            requested = requested.layer_count,
            used = snapshot.layer_count,
            "layer_count clamped"
        );
    }

    snapshot.validate().context("Invalid parameters")?;
    Ok(snapshot)
}
