//! Render command - drive the kernel tick by tick and write frames.
//!
//! This is the external driver: it owns the phase accumulators and advances
//! them by `speed * dt` after every frame, so the kernel itself never sees
//! wall-clock time.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tunnelwonder_compute::{FrameRenderer, NeverCancel, RenderProgress};
use tunnelwonder_core::PhaseAccumulators;

use crate::config;
use crate::export::{frame_path, save_png};

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON parameter snapshot (defaults are used when omitted)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    pub width: u32,

    #[arg(long, default_value_t = 360)]
    pub height: u32,

    /// Number of frames to render
    #[arg(short, long, default_value_t = 1)]
    pub frames: u32,

    /// Simulated frame rate; each frame advances the phases by 1/fps seconds
    #[arg(long, default_value_t = 30.0)]
    pub fps: f64,

    /// Output directory, created if missing
    #[arg(short, long, default_value = "frames")]
    pub output: PathBuf,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Tile edge in pixels (picked from the resolution when omitted)
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Initial depth phase
    #[arg(long, default_value_t = 0.0)]
    pub start_depth: f64,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be a positive number, got {}", args.fps);
    }
    let dt = 1.0 / args.fps;

    let snapshot = config::load_snapshot(args.params.as_deref())?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.unwrap_or(0))
        .build()
        .context("Failed to start worker threads")?;

    let renderer = FrameRenderer::new(args.tile_size);
    let mut phases = PhaseAccumulators::at_depth(args.start_depth);
    let resolution = (args.width, args.height);

    tracing::info!(
        width = args.width,
        height = args.height,
        frames = args.frames,
        threads = pool.current_num_threads(),
        "Rendering to {}",
        args.output.display()
    );

    let started = Instant::now();
    for index in 0..args.frames {
        let frame = pool.install(|| {
            renderer.render_with_progress(
                &snapshot,
                &phases,
                resolution,
                &NeverCancel,
                |progress| log_progress(index, &progress),
            )
        })?;

        let path = frame_path(&args.output, index);
        save_png(&frame, &path)?;
        tracing::debug!(frame = index, depth = phases.depth_phase, "Wrote {}", path.display());

        phases.advance(&snapshot, dt);
    }

    tracing::info!(
        "Rendered {} frame(s) in {:.2}s",
        args.frames,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn log_progress(frame: u32, progress: &RenderProgress) {
    if progress.is_complete {
        tracing::debug!(
            frame,
            tiles = progress.total_tiles,
            "Frame rendered in {:.1} ms",
            progress.elapsed_ms
        );
    } else {
        tracing::trace!(frame, "{:.0}% of tiles done", progress.percentage());
    }
}
