//! Tunnelwonder CLI - offline driver for the tunnel kernel
//!
//! # Commands
//!
//! - `tunnelwonder render` - Integrate phases tick by tick and write PNG frames
//! - `tunnelwonder defaults` - Print the default parameter snapshot as JSON
//!
//! # Usage
//!
//! ```bash
//! # Start from the defaults and tweak them
//! tunnelwonder defaults > params.json
//!
//! # Two seconds of animation at 30 fps
//! tunnelwonder render --params params.json --frames 60 --output frames/
//! ```

mod config;
mod export;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tunnelwonder_core::ParameterSnapshot;

/// Tunnelwonder CLI - render kaleidoscopic Truchet tunnels to PNG
#[derive(Parser)]
#[command(name = "tunnelwonder")]
#[command(about = "Render kaleidoscopic Truchet tunnels to PNG frames")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a sequence of frames
    Render(render::RenderArgs),

    /// Print the default parameter snapshot as JSON
    Defaults,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => render::execute(args),
        Commands::Defaults => {
            println!("{}", ParameterSnapshot::default().to_json_pretty()?);
            Ok(())
        }
    }
}
