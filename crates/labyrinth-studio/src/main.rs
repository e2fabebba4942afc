//! `labyrinth`: generate a binary-tree maze on the GPU and explore it.
//!
//! Viewer keys: drag / arrows pan, wheel / `+` `-` zoom, `0` resets the
//! camera, `R` regenerates with a new seed, `Escape` quits.

mod cli;
mod headless;
mod viewer;

use anyhow::{Context, Result};
use clap::Parser;

use labyrinth_engine::device::GpuInit;
use labyrinth_engine::logging::init_logging;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.logging());

    let request = args.request().context("invalid maze request")?;

    if args.headless {
        headless::run(&request, args.backend.unwrap_or_default(), &GpuInit::default())?;
        return Ok(());
    }

    if args.backend.is_some() {
        log::warn!("--backend only applies with --headless; the viewer always uses the GPU");
    }

    viewer::run(request, args.style())
}
