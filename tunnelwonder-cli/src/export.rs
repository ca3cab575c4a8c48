//! PNG export of rendered frames.

use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tunnelwonder_compute::Frame;

/// `dir/frame_00042.png` for frame 42.
pub fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}

pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.pixels.clone())
        .context("Frame buffer does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
