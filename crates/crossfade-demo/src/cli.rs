use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// How the fade factor is driven.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FadeMode {
    /// `0.5 * sin(t) + 0.5` over wall-clock time.
    Sine,
    /// Constant `--fade-factor`.
    Fixed,
}

#[derive(Debug, Parser)]
#[command(name = "crossfade", about = "Cross-fade two textures on a full-screen quad")]
pub struct Cli {
    /// Directory holding gl2-hello-1.png and gl2-hello-2.png.
    #[arg(
        long,
        env = "CROSSFADE_RESOURCES",
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources")
    )]
    pub resources: PathBuf,

    #[arg(long, value_enum, default_value_t = FadeMode::Sine)]
    pub fade: FadeMode,

    /// Blend weight of the second texture when `--fade fixed`.
    #[arg(long, default_value_t = 0.5, value_parser = parse_unit)]
    pub fade_factor: f32,

    /// Pad textures to power-of-two sizes.
    #[arg(long)]
    pub pow2: bool,

    /// Hide the frame-rate label.
    #[arg(long)]
    pub no_fps: bool,

    #[arg(long, default_value = "crossfade")]
    pub title: String,

    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// Log filter (env_logger syntax); overrides RUST_LOG.
    #[arg(long)]
    pub log: Option<String>,
}

fn parse_unit(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is not in [0, 1]"))
    }
}
