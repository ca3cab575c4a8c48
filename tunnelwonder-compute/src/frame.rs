//! Parallel frame rendering.
//!
//! One [`TunnelKernel`] is built per frame and shared by reference across the
//! rayon pool. Tiles are independent, so workers never synchronize beyond the
//! progress counter. A cancelled frame is thrown away whole.

use crate::cancellation::CancellationChecker;
use crate::error::RenderError;
use crate::kernel::TunnelKernel;
use crate::progress::RenderProgress;
use crate::tile_render::render_tile;
use crate::tiles::{calculate_tile_size, generate_tiles};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use tunnelwonder_core::{ParameterSnapshot, PhaseAccumulators, PixelRect};

/// A finished frame as tightly packed RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    fn blit(&mut self, rect: &PixelRect, data: &[[u8; 4]]) {
        let row_len = rect.width as usize;
        for (row, chunk) in data.chunks(row_len).enumerate() {
            let y = rect.y as usize + row;
            let start = (y * self.width as usize + rect.x as usize) * 4;
            for (i, px) in chunk.iter().enumerate() {
                self.pixels[start + i * 4..start + i * 4 + 4].copy_from_slice(px);
            }
        }
    }
}

/// Renders whole frames on the current rayon pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameRenderer {
    /// Tile edge length; picked from the canvas size when `None`.
    pub tile_size: Option<u32>,
}

impl FrameRenderer {
    pub fn new(tile_size: Option<u32>) -> Self {
        Self { tile_size }
    }

    pub fn render<C: CancellationChecker>(
        &self,
        snapshot: &ParameterSnapshot,
        phases: &PhaseAccumulators,
        resolution: (u32, u32),
        checker: &C,
    ) -> Result<Frame, RenderError> {
        self.render_with_progress(snapshot, phases, resolution, checker, |_| {})
    }

    /// Like [`render`](Self::render), calling `on_progress` after every
    /// finished tile. The callback runs on worker threads.
    pub fn render_with_progress<C, F>(
        &self,
        snapshot: &ParameterSnapshot,
        phases: &PhaseAccumulators,
        resolution: (u32, u32),
        checker: &C,
        on_progress: F,
    ) -> Result<Frame, RenderError>
    where
        C: CancellationChecker,
        F: Fn(RenderProgress) + Sync,
    {
        let (width, height) = resolution;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        snapshot.validate()?;

        let started = Instant::now();
        let tile_size = self
            .tile_size
            .unwrap_or_else(|| calculate_tile_size(width, height));
        let tiles = generate_tiles(width, height, tile_size);
        let total_tiles = tiles.len() as u32;
        let kernel = TunnelKernel::new(snapshot, &phases.for_frame(), resolution);
        let completed = AtomicU32::new(0);

        let rendered: Vec<Option<(PixelRect, Vec<[u8; 4]>)>> = tiles
            .par_iter()
            .map(|tile| {
                if checker.is_cancelled() {
                    return None;
                }
                let data = render_tile(&kernel, tile);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                on_progress(RenderProgress {
                    completed_tiles: done,
                    elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
                    is_complete: done == total_tiles,
                    ..RenderProgress::new(total_tiles)
                });
                Some((*tile, data))
            })
            .collect();

        let completed_tiles = completed.load(Ordering::Relaxed);
        if completed_tiles < total_tiles || checker.is_cancelled() {
            log::debug!("frame cancelled after {completed_tiles}/{total_tiles} tiles");
            return Err(RenderError::Cancelled {
                completed_tiles,
                total_tiles,
            });
        }

        let mut frame = Frame::blank(width, height);
        for (rect, data) in rendered.into_iter().flatten() {
            frame.blit(&rect, &data);
        }

        log::debug!(
            "rendered {width}x{height} in {total_tiles} tiles of {tile_size}px, {:.1} ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(frame)
    }
}
