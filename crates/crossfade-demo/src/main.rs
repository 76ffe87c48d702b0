//! Windowed crossfade demo.
//!
//! Loads `gl2-hello-1.png` and `gl2-hello-2.png` from the resource directory
//! and fades between them on a full-screen quad.

mod cli;

use anyhow::{ensure, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use crossfade_engine::assets::DirAssets;
use crossfade_engine::device::{Gpu, GpuInit};
use crossfade_engine::logging::{init_logging, LoggingConfig};
use crossfade_engine::render::{Renderer, RendererConfig};
use crossfade_engine::texture::TextureLayout;
use crossfade_engine::time::FadeDriver;
use crossfade_engine::window::{Runtime, RuntimeConfig};

use crate::cli::{Cli, FadeMode};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    ensure!(
        cli.resources.is_dir(),
        "resource directory {} does not exist",
        cli.resources.display()
    );

    let fade = match cli.fade {
        FadeMode::Sine => FadeDriver::sine(),
        FadeMode::Fixed => FadeDriver::manual(cli.fade_factor).0,
    };

    let config = RendererConfig {
        texture_layout: if cli.pow2 {
            TextureLayout::PowerOfTwo
        } else {
            TextureLayout::Exact
        },
        show_fps: !cli.no_fps,
        ..RendererConfig::default()
    };

    let assets = DirAssets::new(&cli.resources);
    log::info!("resources: {}", assets.root().display());

    let renderer: Renderer<Gpu> = Renderer::new(assets, config, fade);

    Runtime::run(
        RuntimeConfig {
            title: cli.title,
            initial_size: LogicalSize::new(cli.width, cli.height),
        },
        GpuInit::default(),
        renderer,
    )
}
